// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::Action;
use crate::core::utils::{escape_single_quotes, run_shell_command_silent};
use crate::{sdebug, sinfo};

use super::{AnyError, Daemon};

impl Daemon {
    pub(super) fn exec_action(&self, action: &Action) -> Result<(), AnyError> {
        match action {
            Action::StatusChanged { from, to } => {
                sinfo!("Timer", "{} -> {}", from, to);
                self.status_tx.send_replace(*to);
            }

            Action::Notify { message } => {
                sinfo!("Daemon", "notify: {}", message);
                run_shell_command_silent(&format!(
                    "notify-send -a Orrery '{}'",
                    escape_single_quotes(message)
                ))?;
            }

            Action::RunCommand { command } => {
                sdebug!("Daemon", "run: {}", command);
                run_shell_command_silent(command)?;
            }
        }

        Ok(())
    }
}
