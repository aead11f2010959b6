use std::{
    cell::RefCell,
    io::{self, Write},
    sync::{Arc, Mutex, OnceLock},
};

use simplelog::{Config, LevelFilter, WriteLogger};

use super::{InterphaseTransfer, Phase, ReactingPhaseSystem, SpecieTransfer};
use crate::support::{field::ScalarField, matrix::ScalarMatrix};

/// Implicit diffusion of every species along a chain of cells.
///
/// Each cell holds `alpha * rho / dt` of inertia and exchanges with its
/// neighbours through a unit diffusion coefficient; the chain ends are
/// zero-flux, so every equation conserves the total of its species.
#[derive(Debug)]
pub(super) struct ChainSystem {
    phases: Vec<Phase>,
    dt: f64,
    diffusivity: f64,
    reactions_corrected: usize,
    assembled: RefCell<Vec<(String, String)>>,
    misassembled: Option<String>,
}

impl ChainSystem {
    pub(super) fn new(phases: Vec<Phase>) -> Self {
        Self {
            phases,
            dt: 1.0,
            diffusivity: 1.0,
            reactions_corrected: 0,
            assembled: RefCell::new(Vec::new()),
            misassembled: None,
        }
    }

    /// Assembles a single-cell equation for `specie`, whatever the mesh size.
    pub(super) fn with_misassembled(mut self, specie: &str) -> Self {
        self.misassembled = Some(specie.to_owned());
        self
    }

    pub(super) fn phase(&self, name: &str) -> &Phase {
        self.phases
            .iter()
            .find(|phase| phase.name() == name)
            .expect("phase exists")
    }

    pub(super) fn reactions_corrected(&self) -> usize {
        self.reactions_corrected
    }

    /// `(phase, specie)` of every equation assembled so far.
    pub(super) fn assembled(&self) -> Vec<(String, String)> {
        self.assembled.borrow().clone()
    }
}

impl ReactingPhaseSystem for ChainSystem {
    fn phases(&self) -> &[Phase] {
        &self.phases
    }

    fn phases_mut(&mut self) -> &mut [Phase] {
        &mut self.phases
    }

    fn yi_eqn(&self, phase: &Phase, specie: &ScalarField) -> ScalarMatrix {
        self.assembled
            .borrow_mut()
            .push((phase.name().to_owned(), specie.name().to_owned()));

        if self.misassembled.as_deref() == Some(specie.name()) {
            return ScalarMatrix::new(vec![1.0], vec![0.0]).expect("sizes match");
        }

        let n_cells = specie.len();
        let inertia: Vec<f64> = phase
            .alpha()
            .values()
            .iter()
            .zip(phase.rho().values())
            .map(|(alpha, rho)| alpha * rho / self.dt)
            .collect();

        let diag = (0..n_cells)
            .map(|cell| {
                let neighbours = usize::from(cell > 0) + usize::from(cell + 1 < n_cells);
                inertia[cell] + self.diffusivity * neighbours as f64
            })
            .collect();
        let source = inertia
            .iter()
            .zip(specie.values())
            .map(|(inertia, y)| inertia * y)
            .collect();

        (1..n_cells).fold(
            ScalarMatrix::new(diag, source).expect("sizes match"),
            |matrix, cell| {
                matrix
                    .with_coupling(cell - 1, cell, -self.diffusivity, -self.diffusivity)
                    .expect("neighbouring cells")
            },
        )
    }

    fn correct_reactions(&mut self) {
        self.reactions_corrected += 1;
    }
}

/// Uniform transfer rate for every active species of every mixture.
#[derive(Debug, Clone, Copy)]
pub(super) struct UniformTransfer {
    pub(super) rate: f64,
}

impl InterphaseTransfer for UniformTransfer {
    fn specie_transfer(&mut self, phases: &[Phase]) -> SpecieTransfer {
        let mut transfer = SpecieTransfer::new();
        for phase in phases {
            for specie in phase.active_species() {
                transfer.insert(specie.name(), vec![self.rate; phase.n_cells()]);
            }
        }
        transfer
    }
}

/// A gas mixture of H2O, O2 and an inert species, alongside pure air.
///
/// The gas has `alpha * rho = 1` in every cell.
pub(super) fn gas_and_air(h2o: Vec<f64>, o2: Vec<f64>) -> Vec<Phase> {
    mixture_and_pure("gas", "air", h2o, o2)
}

/// [`gas_and_air`] with the phases renamed.
pub(super) fn mixture_and_pure(
    mixture: &str,
    pure: &str,
    h2o: Vec<f64>,
    o2: Vec<f64>,
) -> Vec<Phase> {
    let n_cells = h2o.len();
    let inert: Vec<f64> = h2o.iter().zip(&o2).map(|(h2o, o2)| 1.0 - h2o - o2).collect();

    let gas = Phase::multi_component(
        mixture,
        ScalarField::uniform(format!("alpha.{mixture}"), n_cells, 0.5),
        ScalarField::uniform(format!("rho.{mixture}"), n_cells, 2.0),
        vec![
            ScalarField::new("H2O", h2o),
            ScalarField::new("O2", o2),
            ScalarField::new("inert", inert),
        ],
        "inert",
    )
    .expect("valid gas phase");

    let air = Phase::pure(
        pure,
        ScalarField::uniform(format!("alpha.{pure}"), n_cells, 0.5),
        ScalarField::uniform(format!("rho.{pure}"), n_cells, 1.2),
        ScalarField::uniform(pure, n_cells, 1.0),
    )
    .expect("valid air phase");

    vec![gas, air]
}

/// In-memory sink for the process-wide logger.
#[derive(Debug, Clone, Default)]
pub(super) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Lines logged so far, by every test in the process.
    pub(super) fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes `info!` and above into a shared buffer, once per test process.
pub(super) fn captured_logs() -> &'static LogBuffer {
    static LOGS: OnceLock<LogBuffer> = OnceLock::new();
    LOGS.get_or_init(|| {
        let buffer = LogBuffer::default();
        WriteLogger::init(LevelFilter::Info, Config::default(), buffer.clone())
            .expect("no other logger is installed");
        buffer
    })
}
