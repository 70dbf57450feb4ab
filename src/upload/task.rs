use std::sync::{Arc, Mutex};

use anyhow::Result;

/// A one-shot unit of work running on its own thread, polled from the
/// frame loop. The slot stays empty until the thread finishes; the
/// result can be taken exactly once.
pub struct BackgroundTask<T> {
    slot: Arc<Mutex<Option<Result<T>>>>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let slot = Arc::new(Mutex::new(None));
        let thread_slot = Arc::clone(&slot);
        std::thread::spawn(move || {
            let outcome = work();
            if let Ok(mut guard) = thread_slot.lock() {
                *guard = Some(outcome);
            }
        });
        Self { slot }
    }

    /// The finished result, if the work is done. `None` while still
    /// running (or after a previous take).
    pub fn try_take(&self) -> Option<Result<T>> {
        self.slot.lock().ok().and_then(|mut guard| guard.take())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_delivers_result() {
        let task = BackgroundTask::spawn(|| Ok(41 + 1));
        let mut outcome = None;
        for _ in 0..200 {
            if let Some(r) = task.try_take() {
                outcome = Some(r);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(outcome.unwrap().unwrap(), 42);
    }

    #[test]
    fn test_delivers_error() {
        let task: BackgroundTask<()> = BackgroundTask::spawn(|| Err(anyhow!("no backend")));
        let mut outcome = None;
        for _ in 0..200 {
            if let Some(r) = task.try_take() {
                outcome = Some(r);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(outcome.unwrap().unwrap_err().to_string(), "no backend");
    }

    #[test]
    fn test_result_taken_once() {
        let task = BackgroundTask::spawn(|| Ok(1));
        while task.try_take().is_none() {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(task.try_take().is_none());
    }
}
