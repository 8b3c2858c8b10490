//! Test doubles shared by the unit tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::host::{Host, TextComponent};

/// Unique directory under the system temp dir, removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("regionguard-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// In-memory host: everyone is online, permissions are granted explicitly.
#[derive(Default)]
pub struct TestHost {
    grants: Mutex<HashSet<(Uuid, String)>>,
    online: Mutex<HashSet<Uuid>>,
    pub messages: Mutex<Vec<(Uuid, TextComponent)>>,
    pub action_bar: Mutex<Vec<(Uuid, TextComponent)>>,
}

impl TestHost {
    pub fn grant(&self, player: Uuid, node: &str) {
        self.grants.lock().unwrap().insert((player, node.to_owned()));
    }

    pub fn set_online(&self, player: Uuid, online: bool) {
        let mut players = self.online.lock().unwrap();
        if online {
            players.insert(player);
        } else {
            players.remove(&player);
        }
    }

    pub fn action_bar_for(&self, player: &Uuid) -> Vec<String> {
        self.action_bar
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == player)
            .map(|(_, msg)| msg.text.clone())
            .collect()
    }

    pub fn messages_for(&self, player: &Uuid) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == player)
            .map(|(_, msg)| msg.text.clone())
            .collect()
    }
}

impl Host for TestHost {
    fn is_online(&self, player: &Uuid) -> bool {
        self.online.lock().unwrap().contains(player)
    }

    fn has_permission(&self, player: &Uuid, node: &str) -> bool {
        self.grants
            .lock()
            .unwrap()
            .contains(&(*player, node.to_owned()))
    }

    fn send_message(&self, player: &Uuid, message: TextComponent) {
        self.messages.lock().unwrap().push((*player, message));
    }

    fn send_action_bar(&self, player: &Uuid, message: TextComponent) {
        self.action_bar.lock().unwrap().push((*player, message));
    }
}
