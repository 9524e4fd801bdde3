//! Usage: Run blocking work (modal dialogs, settings I/O) off the async
//! runtime's core workers.

pub(crate) fn run<F, T>(task: F) -> tauri::async_runtime::JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tauri::async_runtime::spawn_blocking(task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn runs_the_closure_and_returns_its_value() {
        let out = run(|| 2 + 2).await.expect("join");
        assert_eq!(out, 4);
    }
}
