//! Background gateway calls.
//!
//! Each call runs on its own thread with a clone of the [`Gateway`] and
//! reports back through the app's channel. Messages carry the mount id of the
//! screen that asked, so the UI can drop answers meant for a screen that is
//! gone.

use crate::error::Result;
use crate::gateway::{Content, DailyWisdom, DreamInterpretation, Gateway, StarMapReading};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

/// Message sent from a worker thread to the UI.
#[derive(Debug)]
pub enum WorkerMessage {
    Wisdom {
        mount: u64,
        wisdom: DailyWisdom,
    },
    Dream {
        mount: u64,
        result: Result<DreamInterpretation>,
    },
    StarMap {
        mount: u64,
        result: Result<StarMapReading>,
    },
    Chat {
        mount: u64,
        user_text: String,
        result: Result<String>,
    },
}

impl WorkerMessage {
    pub fn mount(&self) -> u64 {
        match self {
            WorkerMessage::Wisdom { mount, .. }
            | WorkerMessage::Dream { mount, .. }
            | WorkerMessage::StarMap { mount, .. }
            | WorkerMessage::Chat { mount, .. } => *mount,
        }
    }
}

/// A send failure only means the UI has shut down.
fn deliver(tx: &Sender<WorkerMessage>, msg: WorkerMessage) {
    if tx.send(msg).is_err() {
        debug!("worker result dropped, ui closed");
    }
}

pub fn spawn_wisdom(gateway: Gateway, tx: Sender<WorkerMessage>, mount: u64) {
    thread::spawn(move || {
        let wisdom = gateway.daily_wisdom();
        deliver(&tx, WorkerMessage::Wisdom { mount, wisdom });
    });
}

pub fn spawn_dream(gateway: Gateway, tx: Sender<WorkerMessage>, mount: u64, text: String) {
    thread::spawn(move || {
        let result = gateway.interpret_dream(&text);
        deliver(&tx, WorkerMessage::Dream { mount, result });
    });
}

pub fn spawn_star_map(
    gateway: Gateway,
    tx: Sender<WorkerMessage>,
    mount: u64,
    date: String,
    time: String,
) {
    thread::spawn(move || {
        let result = gateway.star_map_reading(&date, &time);
        deliver(&tx, WorkerMessage::StarMap { mount, result });
    });
}

pub fn spawn_chat(
    gateway: Gateway,
    tx: Sender<WorkerMessage>,
    mount: u64,
    history: Vec<Content>,
    user_text: String,
) {
    thread::spawn(move || {
        let result = gateway.chat_turn(&history, &user_text);
        deliver(
            &tx,
            WorkerMessage::Chat {
                mount,
                user_text,
                result,
            },
        );
    });
}
