//! Background generation so a render loop can keep drawing while a pass runs.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::config::GeneratorConfig;
use crate::error::{Result, TerraceError};
use crate::generator::generate;
use crate::mesh_builder::TerrainMesh;

/// A generation pass running on its own thread. Cannot be cancelled;
/// dropping the task detaches the worker and discards its result.
pub struct GenerationTask {
    result_rx: Receiver<Result<TerrainMesh>>,
    worker: JoinHandle<()>,
    delivered: bool,
    started: Instant,
}

/// Validate `config`, then run [`generate`] on a worker thread. The noise
/// source is built on the worker.
pub fn start_generation(config: GeneratorConfig) -> Result<GenerationTask> {
    config.validate()?;
    let (result_tx, result_rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        let _ = result_tx.send(generate(&config));
    });
    Ok(GenerationTask {
        result_rx,
        worker,
        delivered: false,
        started: Instant::now(),
    })
}

impl GenerationTask {
    /// Non-blocking. Returns the result exactly once; `None` while running
    /// and after delivery.
    pub fn poll(&mut self) -> Option<Result<TerrainMesh>> {
        if self.delivered {
            return None;
        }
        let result = match self.result_rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(TerraceError::WorkerDisconnected),
        };
        self.delivered = true;
        Some(result)
    }

    /// Whether the worker has stopped (a result is ready or already taken).
    pub fn is_done(&self) -> bool {
        self.delivered || self.worker.is_finished()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Block until the worker finishes.
    pub fn wait(self) -> Result<TerrainMesh> {
        if self.delivered {
            return Err(TerraceError::WorkerDisconnected);
        }
        let result = self
            .result_rx
            .recv()
            .unwrap_or(Err(TerraceError::WorkerDisconnected));
        if self.worker.join().is_err() {
            log::error!("Terrain worker panicked");
        }
        result
    }
}

/// The mesh currently on display plus at most one pass in flight.
///
/// A finished pass replaces the displayed mesh only when it succeeds; a
/// failed pass is logged and the previous mesh stays.
#[derive(Default)]
pub struct MeshSlot {
    current: Option<TerrainMesh>,
    pending: Option<GenerationTask>,
    generation: u64,
}

impl MeshSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&TerrainMesh> {
        self.current.as_ref()
    }

    /// Number of meshes swapped in so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a new pass. Refused while another pass is still running.
    pub fn request(&mut self, config: GeneratorConfig) -> Result<bool> {
        if self.is_busy() {
            log::debug!("Terrain generation already running, request ignored");
            return Ok(false);
        }
        self.pending = Some(start_generation(config)?);
        Ok(true)
    }

    /// Poll the pending pass once. Returns `true` when a new mesh was swapped in.
    pub fn update(&mut self) -> bool {
        let Some(task) = self.pending.as_mut() else {
            return false;
        };
        let Some(result) = task.poll() else {
            return false;
        };
        let secs = task.elapsed_secs();
        self.pending = None;

        match result {
            Ok(mesh) => {
                log::debug!("Terrain pass finished after {secs:.2}s");
                self.current = Some(mesh);
                self.generation += 1;
                true
            }
            Err(e) => {
                log::error!("Terrain generation failed, keeping previous mesh: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick() -> GeneratorConfig {
        GeneratorConfig {
            segments: 5,
            max_depth: 2,
            octaves: 1,
            seed: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn background_result_matches_direct_generation() {
        let direct = generate(&quick()).unwrap();
        let task = start_generation(quick()).unwrap();
        assert_eq!(task.wait().unwrap(), direct);
    }

    #[test]
    fn poll_delivers_once() {
        let mut task = start_generation(quick()).unwrap();
        let result = loop {
            if let Some(result) = task.poll() {
                break result;
            }
            thread::sleep(Duration::from_millis(1));
        };
        assert!(result.is_ok());
        assert!(task.is_done());
        assert!(task.poll().is_none());
    }

    #[test]
    fn invalid_config_is_rejected_synchronously() {
        let config = GeneratorConfig {
            octaves: 0,
            ..quick()
        };
        assert!(matches!(
            start_generation(config),
            Err(TerraceError::InvalidConfig { field: "octaves", .. })
        ));
    }

    #[test]
    fn slot_swaps_in_finished_mesh() {
        let mut slot = MeshSlot::new();
        assert!(slot.request(quick()).unwrap());
        assert!(!slot.request(quick()).unwrap());
        while !slot.update() {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!slot.is_busy());
        assert_eq!(slot.generation(), 1);
        assert!(slot.current().unwrap().triangle_count() >= 20);
    }

    #[test]
    fn rejected_request_keeps_previous_mesh() {
        let mut slot = MeshSlot::new();
        slot.request(quick()).unwrap();
        while !slot.update() {
            thread::sleep(Duration::from_millis(1));
        }
        let before = slot.current().cloned();
        let bad = GeneratorConfig {
            radius: 0.0,
            ..quick()
        };
        assert!(slot.request(bad).is_err());
        assert!(!slot.is_busy());
        assert_eq!(slot.current().cloned(), before);
    }
}
