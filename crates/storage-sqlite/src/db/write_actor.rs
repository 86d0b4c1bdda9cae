//! Single-writer actor for database mutations.
//!
//! All mutating operations are submitted as jobs to one background task
//! owning a dedicated connection. Jobs run serially, each inside an
//! immediate transaction, so a read-modify-write sequence (line lookup,
//! upsert, price reconciliation) is one atomic unit relative to every
//! other mutation. Readers on the pool never observe a half-applied job.

use std::any::Any;

use diesel::{Connection, SqliteConnection};
use tokio::sync::{mpsc, oneshot};

use shopcart_core::errors::Result;

use super::DbPool;
use crate::errors::StorageError;

// A job takes the writer's connection and returns a core Result. The
// Box<dyn Any + Send> erases the job's return type so one channel can
// carry them all.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated
    /// connection, inside an immediate transaction. An `Err` from the
    /// job rolls the transaction back; the error kind reaches the caller
    /// unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor holds one connection from the pool for its whole
/// lifetime and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool.get().expect(
            "Failed to get a connection from the DB pool for the writer actor. \
             The pool might be exhausted or misconfigured.",
        );

        while let Some((job, reply_tx)) = rx.recv().await {
            // StorageError::Core carries business errors (NotFound,
            // Validation, NotModified) across the rollback boundary so
            // callers see the original kind, not a transaction failure.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // Ignore send errors: the requester may have been cancelled.
            let _ = reply_tx.send(result);
        }
        // rx.recv() returned None: every WriteHandle was dropped, so the
        // actor terminates.
    });

    WriteHandle { tx }
}
