//! Oracle command handler: a line-based chat with Órion.

use super::require_gateway;
use crate::error::Result;
use crate::gateway::{ChatSession, Gateway};
use crate::output::{print_chat_message, print_info, print_section, BOLD, RESET};
use crate::progress::Spinner;
use std::io::{self, BufRead, Write};

const EXIT_COMMAND: &str = "/sair";

/// Chat on stdin/stdout until `/sair` or end of input.
pub fn oracle_command(gateway: &Gateway) -> Result<()> {
    require_gateway(gateway)?;
    let stdin = io::stdin();
    run_oracle(gateway, stdin.lock())?;
    Ok(())
}

fn run_oracle<R: BufRead>(gateway: &Gateway, input: R) -> Result<ChatSession> {
    let mut session = gateway.create_chat_session()?;

    print_section("Oráculo");
    print_info(&format!("Digite {} para encerrar.", EXIT_COMMAND));
    for message in session.messages() {
        print_chat_message(message);
    }

    let mut lines = input.lines();
    loop {
        print!("{BOLD}> {RESET}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let text = line.trim();
        if text == EXIT_COMMAND {
            break;
        }
        if text.is_empty() {
            continue;
        }

        let spinner = Spinner::start("Sintonizando frequências...");
        let reply = session.send_message(gateway, text).cloned();
        spinner.finish();
        if let Some(reply) = reply {
            print_chat_message(&reply);
        }
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::ScriptedModel;
    use crate::gateway::INTERFERENCE_MESSAGE;
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn test_oracle_stops_at_exit_command() {
        let model = Arc::new(ScriptedModel::new(vec![Ok("Brilhe ✨".to_string())]));
        let gateway = Gateway::with_model(model.clone());
        let input = Cursor::new("olá\n\n/sair\nignorado\n");

        let session = run_oracle(&gateway, input).unwrap();
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].text, "Brilhe ✨");
        assert_eq!(model.requests().len(), 1);
    }

    #[test]
    fn test_oracle_continues_after_failure_until_eof() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err("offline".to_string()),
            Ok("Voltei".to_string()),
        ]));
        let gateway = Gateway::with_model(model);
        let session = run_oracle(&gateway, Cursor::new("um\ndois")).unwrap();

        let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[2], INTERFERENCE_MESSAGE);
        assert_eq!(texts[4], "Voltei");
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_oracle_requires_key() {
        assert!(oracle_command(&Gateway::unconfigured())
            .unwrap_err()
            .is_unconfigured());
    }
}
