use futures::future::LocalBoxFuture;
use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info};

/// Creates a fresh run of a background job
pub type JobFactory = Arc<dyn Fn() -> LocalBoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct JobStatus {
    pub name: String,
    pub running: bool,
    /// Error or panic message of the last run
    pub fault: Option<String>,
}

struct SupervisedJob {
    factory: JobFactory,
    status: Arc<Mutex<JobStatus>>,
}

/// Keeps track of the background jobs so that a failing job is reported
/// instead of taking the server down, and can be started again on request
#[derive(Clone, Default)]
pub struct Supervisor {
    jobs: Arc<Mutex<Vec<SupervisedJob>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Job panicked".into()
    }
}

fn launch(job: &SupervisedJob) {
    {
        let mut status = lock(&job.status);
        status.running = true;
        status.fault = None;
    }

    let status = job.status.clone();
    let run = (job.factory)();
    actix_web::rt::spawn(async move {
        let fault = match actix_web::rt::spawn(run).await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(format!("{:#}", e)),
            Err(e) if e.is_panic() => Some(panic_message(e.into_panic())),
            Err(_) => Some("Job was cancelled".into()),
        };

        let mut status = lock(&status);
        if let Some(fault) = &fault {
            error!("Job {} stopped: {}", status.name, fault);
        } else {
            info!("Job {} finished", status.name);
        }
        status.running = false;
        status.fault = fault;
    });
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the job and starts its first run
    pub fn supervise(&self, name: &str, factory: JobFactory) {
        let job = SupervisedJob {
            factory,
            status: Arc::new(Mutex::new(JobStatus {
                name: name.to_string(),
                running: false,
                fault: None,
            })),
        };
        launch(&job);
        lock(&self.jobs).push(job);
    }

    pub fn statuses(&self) -> Vec<JobStatus> {
        lock(&self.jobs)
            .iter()
            .map(|job| lock(&job.status).clone())
            .collect()
    }

    /// Starts every job that is not running anymore
    pub fn reset(&self) -> Vec<JobStatus> {
        for job in lock(&self.jobs).iter() {
            let stopped = !lock(&job.status).running;
            if stopped {
                info!("Restarting job {}", lock(&job.status).name);
                launch(job);
            }
        }
        self.statuses()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    async fn explode() -> anyhow::Result<()> {
        panic!("boom")
    }

    async fn settle() {
        actix_web::rt::time::sleep(Duration::from_millis(20)).await;
    }

    #[actix_web::main]
    #[test]
    async fn reports_failed_job_and_restarts_it() {
        let supervisor = Supervisor::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        supervisor.supervise(
            "flaky",
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(anyhow::anyhow!("store went away")) }.boxed_local()
            }),
        );
        settle().await;

        let statuses = supervisor.statuses();
        assert_eq!(statuses.len(), 1);
        assert!(!statuses[0].running);
        assert_eq!(statuses[0].fault.as_deref(), Some("store went away"));

        supervisor.reset();
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[actix_web::main]
    #[test]
    async fn captures_panics() {
        let supervisor = Supervisor::new();
        supervisor.supervise(
            "panicky",
            Arc::new(|| explode().boxed_local()),
        );
        settle().await;

        let statuses = supervisor.statuses();
        assert_eq!(statuses[0].fault.as_deref(), Some("boom"));
    }

    #[actix_web::main]
    #[test]
    async fn reset_leaves_running_jobs_alone() {
        let supervisor = Supervisor::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        supervisor.supervise(
            "forever",
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                futures::future::pending::<anyhow::Result<()>>().boxed_local()
            }),
        );
        settle().await;

        let statuses = supervisor.reset();
        assert!(statuses[0].running);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
