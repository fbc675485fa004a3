#![allow(missing_docs)]

/// Installs the global subscriber. Logs go to stderr so stdout stays free for command output.
pub fn init(color: bool, json: bool, levels: &str) {
    let builder = tracing_subscriber::fmt()
        .with_ansi(color && !json)
        .with_writer(std::io::stderr)
        .with_env_filter(levels);

    if json {
        builder.json().flatten_event(true).init();
    } else {
        builder.init();
    }
}
