//! # Account Subcommands
//!
//! Login and logout, registration of the first account, password reset,
//! and the business name shown on printed registers.

use anyhow::{bail, Result};
use clap::Subcommand;

use areg_core::Route;
use areg_models::AccountFlow;

use crate::prompt::value_or_prompt;
use crate::Context;

const PASSWORD_PROMPT: &str = "Password (input is visible): ";
const NEW_PASSWORD_PROMPT: &str = "New password (input is visible): ";

/// Account subcommands.
#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for on stdin when omitted. The prompt echoes what is
        /// typed, and a value given here shows in the process list, so use
        /// either only in a private terminal.
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session.
    Logout,

    /// Show who is logged in.
    Whoami,

    /// Create the first account. Closed once any account exists.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Prompted for on stdin when omitted. The prompt echoes what is
        /// typed, and a value given here shows in the process list, so use
        /// either only in a private terminal.
        #[arg(long)]
        password: Option<String>,
    },

    /// Email a password reset link.
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Set a new password with the token from a reset link.
    ResetPassword {
        /// Token from the reset link.
        token: String,
        /// Prompted for on stdin when omitted. The prompt echoes what is
        /// typed, and a value given here shows in the process list, so use
        /// either only in a private terminal.
        #[arg(long)]
        password: Option<String>,
    },

    /// Show the business name, or change it when NAME is given.
    BusinessName {
        name: Option<String>,
    },
}

/// Execute an account subcommand.
pub async fn run_account(command: &AccountCommand, ctx: &Context) -> Result<u8> {
    let flow = AccountFlow::new(ctx.client.clone());

    match command {
        AccountCommand::Login { email, password } => {
            let password = value_or_prompt(password.as_deref(), PASSWORD_PROMPT)?;
            let session = flow.login(email, &password).await?;
            println!("OK: logged in as {} ({})", session.username, session.email);
            Ok(0)
        }

        AccountCommand::Logout => {
            flow.logout()?;
            println!("OK: logged out");
            Ok(0)
        }

        AccountCommand::Whoami => match flow.session() {
            Some(session) if session.has_token() => {
                println!("User:     {}", session.username);
                println!("Email:    {}", session.email);
                println!("Business: {}", flow.display_name());
                Ok(0)
            }
            _ => {
                println!("Not logged in.");
                Ok(1)
            }
        },

        AccountCommand::Register {
            username,
            email,
            password,
        } => {
            if !flow.registration_open().await {
                bail!("registration is closed: an account already exists");
            }
            let password = value_or_prompt(password.as_deref(), PASSWORD_PROMPT)?;
            flow.register(username, email, &password).await?;
            println!("OK: account created; run `areg login --email {email}`");
            Ok(0)
        }

        AccountCommand::ForgotPassword { email } => {
            let message = flow.forgot_password(email).await?;
            if message.is_empty() {
                println!("OK: if {email} has an account, a reset link is on its way");
            } else {
                println!("OK: {message}");
            }
            Ok(0)
        }

        AccountCommand::ResetPassword { token, password } => {
            let password = value_or_prompt(password.as_deref(), NEW_PASSWORD_PROMPT)?;
            flow.reset_password(token, &password).await?;
            println!("OK: password changed; log in with the new password");
            Ok(0)
        }

        AccountCommand::BusinessName { name: None } => {
            println!("{}", flow.display_name());
            Ok(0)
        }

        AccountCommand::BusinessName { name: Some(name) } => {
            ctx.require(Route::Dashboard)?;
            let stored = flow.rename_business(name).await?;
            println!("OK: business name set to {stored}");
            Ok(0)
        }
    }
}
