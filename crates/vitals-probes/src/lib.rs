// Error types
pub mod error;

// Command seam
pub mod commands;
pub mod runner;

// Probe trait
pub mod traits;

// Severity rules
pub mod classify;

// Subsystem probes
pub mod battery;
pub mod bluetooth;
pub mod cpu;
pub mod disk;
pub mod icloud;
pub mod memory;
pub mod network;
pub mod thermal;
pub mod timemachine;

// Traits
pub use traits::Probe;

// Runners
pub use commands::CommandSpec;
pub use runner::{CommandRunner, SystemRunner};

// Probes
pub use battery::BatteryProbe;
pub use bluetooth::BluetoothProbe;
pub use cpu::CpuProbe;
pub use disk::DiskProbe;
pub use icloud::ICloudProbe;
pub use memory::MemoryProbe;
pub use network::NetworkProbe;
pub use thermal::ThermalProbe;
pub use timemachine::TimeMachineProbe;

// Error types
pub use error::{Error, Result};
