use dbsession::{ConfigStore, DatabaseSession, SessionError};
use std::process::ExitCode;
use tracing::info;

const USAGE: &str = "\
Usage:
  dbsession save <connection-string> <timeout>
  dbsession show
  dbsession query <sql>
  dbsession update <sql>";

fn main() -> ExitCode {
    // Logs go to stderr so query output stays clean on stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let store = ConfigStore::default();

    let outcome = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["save", connection_string, timeout] => match timeout.parse::<i32>() {
            Ok(timeout) => {
                store.save_config(connection_string, timeout);
                println!("Configuration saved to {}", store.path().display());
                Ok(())
            }
            Err(_) => {
                eprintln!("Timeout must be an integer: {}", timeout);
                return ExitCode::from(2);
            }
        },
        ["show"] => {
            match store.load_config() {
                Some(config) => {
                    println!("connectionString: {}", config.connection_string().unwrap_or("<missing>"));
                    match config.timeout() {
                        Some(timeout) => println!("timeout: {}", timeout),
                        None => println!("timeout: <missing>"),
                    }
                }
                None => println!("No configuration found."),
            }
            Ok(())
        }
        ["query", sql] => with_session(&store, |session| {
            let rs = session.execute_query(sql)?;
            println!("{}", rs.columns().join(" | "));
            for row in rs {
                println!("{}", row.to_strings().join(" | "));
            }
            Ok(())
        }),
        ["update", sql] => with_session(&store, |session| {
            let rows = session.execute_update(sql)?;
            println!("{} rows affected", rows);
            Ok(())
        }),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Loads the stored configuration, connects, runs `op` and disconnects.
fn with_session<F>(store: &ConfigStore, op: F) -> Result<(), SessionError>
where
    F: FnOnce(&mut DatabaseSession) -> Result<(), SessionError>,
{
    let config = match store.load_config() {
        Some(stored) => stored.into_config(),
        None => Err(SessionError::Config(format!(
            "no readable configuration at {}",
            store.path().display()
        ))),
    };
    let config = config.map_err(|e| {
        eprintln!("{}", e);
        e
    })?;

    let mut session = DatabaseSession::from_config(&config);
    session.set_on_connected(|msg| eprintln!("{}", msg));
    session.set_on_query_executed(|msg| eprintln!("{}", msg));
    session.set_on_error(|msg| eprintln!("{}", msg));

    info!("Using {}", session.connection_string());
    session.connect()?;
    let outcome = op(&mut session);
    session.disconnect()?;
    outcome
}
