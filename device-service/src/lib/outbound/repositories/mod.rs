pub mod device;

pub use device::PostgresDeviceRepository;
