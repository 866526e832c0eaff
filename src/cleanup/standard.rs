//! The predefined cleanups every collection can start with.

use crate::cleanup::action::{Cleanup, RefreshPolicy};

pub const OPEN_IN_FILE_MANAGER: &str = "cleanup_open_in_file_manager";
pub const OPEN_IN_TERMINAL: &str = "cleanup_open_in_terminal";
pub const COMPRESS_SUBTREE: &str = "cleanup_compress_subtree";
pub const MAKE_CLEAN: &str = "cleanup_make_clean";
pub const DELETE_TRASH: &str = "cleanup_delete_trash";
pub const MOVE_TO_TRASH: &str = "cleanup_move_to_trash";
pub const HARD_DELETE: &str = "cleanup_hard_delete";

/// All standard cleanups, in menu order.
pub fn std_cleanups() -> Vec<Cleanup> {
    vec![
        open_in_file_manager(),
        open_in_terminal(),
        compress_subtree(),
        make_clean(),
        delete_trash(),
        move_to_trash(),
        hard_delete(),
    ]
}

fn open_in_file_manager() -> Cleanup {
    let mut cleanup = Cleanup::new(OPEN_IN_FILE_MANAGER, "Open in File Manager", "xdg-open %p");
    cleanup.works_local_only = false;
    cleanup
}

fn open_in_terminal() -> Cleanup {
    let mut cleanup = Cleanup::new(OPEN_IN_TERMINAL, "Open in Terminal", "x-terminal-emulator &");
    cleanup.works_for_file = false;
    cleanup.works_for_dot_entry = true;
    cleanup
}

fn compress_subtree() -> Cleanup {
    let mut cleanup = Cleanup::new(
        COMPRESS_SUBTREE,
        "Compress",
        "cd .. && tar cjvf %n.tar.bz2 %n && rm -rf %n",
    );
    cleanup.works_for_file = false;
    cleanup.refresh_policy = RefreshPolicy::RefreshParent;
    cleanup
}

fn make_clean() -> Cleanup {
    let mut cleanup = Cleanup::new(MAKE_CLEAN, "make clean", "make clean");
    cleanup.works_for_file = false;
    cleanup.works_for_dot_entry = true;
    cleanup.refresh_policy = RefreshPolicy::RefreshThis;
    cleanup
}

fn delete_trash() -> Cleanup {
    let mut cleanup = Cleanup::new(
        DELETE_TRASH,
        "Delete Trash Files",
        "rm -f *.o *~ *.bak *.auto core",
    );
    cleanup.works_for_file = false;
    cleanup.works_for_dot_entry = true;
    cleanup.recurse = true;
    cleanup.refresh_policy = RefreshPolicy::RefreshThis;
    cleanup
}

fn move_to_trash() -> Cleanup {
    let mut cleanup = Cleanup::new(MOVE_TO_TRASH, "Delete (to Trash Bin)", "gio trash %p");
    cleanup.refresh_policy = RefreshPolicy::AssumeDeleted;
    cleanup.shortcut = Some("Delete".to_string());
    cleanup
}

fn hard_delete() -> Cleanup {
    let mut cleanup = Cleanup::new(HARD_DELETE, "Delete (no way to undelete!)", "rm -rf %p");
    cleanup.ask_for_confirmation = true;
    cleanup.refresh_policy = RefreshPolicy::AssumeDeleted;
    cleanup.shortcut = Some("Shift+Delete".to_string());
    cleanup
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_std_cleanups_order_and_ids() {
        let ids: Vec<String> = std_cleanups().into_iter().map(|c| c.id().to_string()).collect();
        assert_eq!(
            ids,
            vec![
                OPEN_IN_FILE_MANAGER,
                OPEN_IN_TERMINAL,
                COMPRESS_SUBTREE,
                MAKE_CLEAN,
                DELETE_TRASH,
                MOVE_TO_TRASH,
                HARD_DELETE,
            ]
        );
    }

    #[test]
    fn test_std_cleanup_ids_unique() {
        let cleanups = std_cleanups();
        let ids: HashSet<&str> = cleanups.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), cleanups.len());
    }

    #[test]
    fn test_hard_delete_is_guarded() {
        let cleanup = hard_delete();
        assert!(cleanup.ask_for_confirmation);
        assert_eq!(cleanup.refresh_policy, RefreshPolicy::AssumeDeleted);
    }

    #[test]
    fn test_delete_trash_recurses() {
        let cleanup = delete_trash();
        assert!(cleanup.recurse);
        assert!(!cleanup.works_for_file);
    }

    #[test]
    fn test_all_enabled_with_commands() {
        for cleanup in std_cleanups() {
            assert!(cleanup.enabled, "{} should be enabled", cleanup.id());
            assert!(!cleanup.command.is_empty(), "{} has no command", cleanup.id());
        }
    }
}
