//! Target device and component architecture catalogs.
//!
//! The [`DeviceCatalog`] holds one immutable [`DeviceProfile`] per supported
//! FPGA (capacities, unit delays, power coefficients). The
//! [`ArchitectureCatalog`] holds one [`ArchitectureProfile`] per
//! (component kind, architecture) pair with closed-form delay and area
//! formulas. Both are built once and shared by reference.
//!
//! ```
//! use hdlscope_arch::{Architecture, ArchitectureCatalog, ComponentKind, DeviceCatalog, Dims};
//!
//! let devices = DeviceCatalog::builtin();
//! assert_eq!(devices.get("artix7").unwrap().name, "Artix-7");
//!
//! let archs = ArchitectureCatalog::builtin();
//! let adder = archs.get(ComponentKind::Adder, Architecture::RippleCarry).unwrap();
//! assert!(adder.delay_ns(Dims::new(16)) > adder.delay_ns(Dims::new(8)));
//! ```

#![warn(missing_docs)]

pub mod architecture;
pub mod device;
pub mod intel;
pub mod lattice;
pub mod types;
pub mod xilinx;

pub use architecture::{
    Architecture, ArchitectureCatalog, ArchitectureProfile, ComponentKind, Dims,
};
pub use device::{DeviceCatalog, DeviceProfile, Vendor, DEFAULT_DEVICE};
pub use types::{PackageKind, ParseKindError, ResourceUsage, SpeedGrade};
