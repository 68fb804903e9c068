pub mod derive;
pub mod instrument;
pub mod mission;
pub mod orbit;
pub mod registry;
pub mod subject;

pub use instrument::Instrument;
pub use mission::{Mission, OrbitClasses, OrbitDetails};
pub use orbit::{AltitudeClass, InclinationClass, LstClass, OrbitType, RepeatCycleClass};
pub use registry::{Agency, Measurement, DEFAULT_INSTRUMENT_TYPES};
pub use subject::{ClassificationResult, SubjectKey, SubjectKind};
