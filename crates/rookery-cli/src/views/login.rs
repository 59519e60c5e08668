//! Login and registration forms.

use colored::Colorize;
use rookery_application::RegisterForm;
use rustyline::DefaultEditor;

use crate::router::{Nav, Route};
use crate::shell::Services;
use crate::views::read_line;

/// The login form. `register` at the username prompt switches to the
/// registration form.
pub async fn login(services: &Services, editor: &mut DefaultEditor) -> anyhow::Result<Nav> {
    println!("{}", "Login".bright_white().bold());
    println!("{}", "(type 'register' to create an account)".bright_black());

    loop {
        let username = match read_line(editor, "username: ")? {
            Some(line) => line,
            None => return Ok(Nav::Quit),
        };
        match username.as_str() {
            "" => continue,
            "quit" => return Ok(Nav::Quit),
            "register" => return Ok(Nav::Goto(Route::Register)),
            _ => {}
        }

        let password = match read_line(editor, "password: ")? {
            Some(line) => line,
            None => return Ok(Nav::Quit),
        };

        match services.auth.login(&username, &password).await {
            Ok(()) => {
                println!("{}", format!("Welcome back, {}!", username).bright_green());
                return Ok(Nav::Goto(Route::Feed));
            }
            Err(err) => {
                println!(
                    "{}",
                    err.display_message("Login failed. Please check your credentials.")
                        .red()
                );
            }
        }
    }
}

/// The registration form. Validation errors are rendered inline and the
/// form restarts; a successful registration auto-logs-in.
pub async fn register(services: &Services, editor: &mut DefaultEditor) -> anyhow::Result<Nav> {
    println!("{}", "Create Account".bright_white().bold());
    println!("{}", "(type 'login' to go back)".bright_black());

    loop {
        let mut form = RegisterForm::default();

        match read_line(editor, "username: ")? {
            Some(line) if line == "login" => return Ok(Nav::Goto(Route::Login)),
            Some(line) if line == "quit" => return Ok(Nav::Quit),
            Some(line) => form.username = line,
            None => return Ok(Nav::Quit),
        }
        match read_line(editor, "email: ")? {
            Some(line) => form.email = line,
            None => return Ok(Nav::Quit),
        }
        match read_line(editor, "display name: ")? {
            Some(line) => form.display_name = line,
            None => return Ok(Nav::Quit),
        }
        match read_line(editor, "password (at least 8 characters): ")? {
            Some(line) => form.password = line,
            None => return Ok(Nav::Quit),
        }
        match read_line(editor, "confirm password: ")? {
            Some(line) => form.confirm_password = line,
            None => return Ok(Nav::Quit),
        }

        match services.auth.register(&form).await {
            Ok(()) => {
                println!("{}", "Account created.".bright_green());
                return Ok(Nav::Goto(Route::Feed));
            }
            Err(err) => {
                println!(
                    "{}",
                    err.display_message("Registration failed. Please try again.")
                        .red()
                );
            }
        }
    }
}
