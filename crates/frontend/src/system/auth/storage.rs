//! Session tokens persisted in `localStorage`

use web_sys::Storage;

#[derive(Debug, Clone, Copy)]
enum TokenSlot {
    Access,
    Refresh,
}

impl TokenSlot {
    fn key(self) -> &'static str {
        match self {
            TokenSlot::Access => "roomdesk.access_token",
            TokenSlot::Refresh => "roomdesk.refresh_token",
        }
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read(slot: TokenSlot) -> Option<String> {
    local_storage()?
        .get_item(slot.key())
        .ok()
        .flatten()
        .filter(|t| !t.is_empty())
}

fn write(slot: TokenSlot, token: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(slot.key(), token).is_err() {
            log::warn!("Could not persist {}", slot.key());
        }
    }
}

pub fn save_access_token(token: &str) {
    write(TokenSlot::Access, token);
}

pub fn get_access_token() -> Option<String> {
    read(TokenSlot::Access)
}

pub fn save_refresh_token(token: &str) {
    write(TokenSlot::Refresh, token);
}

pub fn get_refresh_token() -> Option<String> {
    read(TokenSlot::Refresh)
}

pub fn clear_tokens() {
    if let Some(storage) = local_storage() {
        for slot in [TokenSlot::Access, TokenSlot::Refresh] {
            let _ = storage.remove_item(slot.key());
        }
    }
}
