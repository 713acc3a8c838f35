use std::{backtrace::Backtrace, panic::PanicHookInfo, thread};

/// Log to stderr so stdout only carries the deployment result.
/// `env_filter` uses the `RUST_LOG` directive syntax.
pub fn initialize(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    std::panic::set_hook(Box::new(tracing_panic_hook));
}

/// Replaces the default panic hook, the message and backtrace go through
/// tracing only so a panic is reported once.
fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    tracing::error!("{}", panic_message(name, panic, &Backtrace::capture()));
}

fn panic_message(
    thread_name: &str,
    panic: &impl std::fmt::Display,
    backtrace: &Backtrace,
) -> String {
    format!("thread '{thread_name}' {panic}\nstack backtrace:\n{backtrace}")
}

#[cfg(test)]
mod tests {
    use std::backtrace::Backtrace;

    use super::panic_message;

    #[test]
    fn panic_message_names_thread_once() {
        let message = panic_message(
            "main",
            &"panicked at src/main.rs:1:1",
            &Backtrace::disabled(),
        );

        assert!(message.starts_with("thread 'main' panicked at src/main.rs:1:1\n"));
        assert_eq!(message.matches("thread 'main'").count(), 1);
    }
}
