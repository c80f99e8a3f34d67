//! Scripted job templates
//!
//! The fixed set seeds the pool on every reset; the rotating spawn catalog
//! feeds dynamic load injection so the system stays observable instead of
//! draining to idle.

use core_types::Action;
use serde::{Deserialize, Serialize};

/// A scripted job description, cloned into each live process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTemplate {
    pub name: String,
    #[serde(default)]
    pub arrival_time: u64,
    pub memory_pages: u32,
    pub actions: Vec<Action>,
}

impl ProcessTemplate {
    pub fn new(
        name: impl Into<String>,
        arrival_time: u64,
        memory_pages: u32,
        actions: Vec<Action>,
    ) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            memory_pages,
            actions,
        }
    }
}

/// The fixed template set demonstrating every mechanism deterministically.
pub fn default_templates() -> Vec<ProcessTemplate> {
    vec![
        ProcessTemplate::new(
            "compiler",
            0,
            6,
            vec![
                Action::cpu("load compiler"),
                Action::mem("touch code segment", 0),
                Action::mem("touch data segment", 1),
                Action::file_create("emit intermediate object", "/build/tmp.o", 4),
                Action::cpu("parse sources"),
                Action::io("wait for disk write", 2),
                Action::mem("touch fresh code page", 4),
                Action::cpu("optimize instructions"),
                Action::file_write("write output binary", "/build/app", 6),
                Action::cpu("clean up"),
            ],
        ),
        ProcessTemplate::new(
            "database",
            1,
            5,
            vec![
                Action::cpu("accept query"),
                Action::mem("touch index page", 2),
                Action::file_read("fetch user rows", "/data/users"),
                Action::cpu("aggregate results"),
                Action::io("wait for disk", 1),
                Action::mem("touch cache page", 3),
                Action::cpu("return result set"),
            ],
        ),
        ProcessTemplate::new(
            "producer",
            2,
            2,
            vec![
                Action::cpu("prepare batch"),
                Action::produce("publish item"),
                Action::produce("publish item"),
                Action::mem("touch staging page", 0),
                Action::produce("publish item"),
                Action::cpu("wrap up"),
            ],
        ),
        ProcessTemplate::new(
            "backup",
            3,
            4,
            vec![
                Action::file_create("open backup log", "/backup/log", 1),
                Action::mem("scan page", 0),
                Action::cpu("compress data"),
                Action::file_write("write image", "/backup/image", 8),
                Action::io("flush to disk", 2),
                Action::mem("verify page", 2),
                Action::file_delete("drop stale image", "/backup/old"),
                Action::cpu("clean up"),
            ],
        ),
        ProcessTemplate::new(
            "consumer",
            4,
            2,
            vec![
                Action::consume("take item"),
                Action::cpu("process item"),
                Action::consume("take item"),
                Action::mem("touch scratch page", 1),
                Action::consume("take item"),
            ],
        ),
    ]
}

/// The rotating catalog dynamic spawn draws from.
pub fn spawn_templates() -> Vec<ProcessTemplate> {
    vec![
        ProcessTemplate::new(
            "worker",
            0,
            3,
            vec![
                Action::cpu("crunch numbers"),
                Action::mem("touch working set", 0),
                Action::cpu("crunch numbers"),
            ],
        ),
        ProcessTemplate::new(
            "producer",
            0,
            2,
            vec![
                Action::produce("publish item"),
                Action::cpu("prepare next batch"),
                Action::produce("publish item"),
            ],
        ),
        ProcessTemplate::new(
            "printer-job",
            0,
            2,
            vec![
                Action::res_acquire("claim printer", "printer"),
                Action::cpu("format document"),
                Action::io("print pages", 1),
                Action::res_release("release printer", "printer"),
            ],
        ),
        ProcessTemplate::new(
            "consumer",
            0,
            2,
            vec![
                Action::consume("take item"),
                Action::cpu("process item"),
                Action::consume("take item"),
            ],
        ),
    ]
}
