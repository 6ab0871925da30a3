//! `hdlscope devices`: lists the built-in catalogs.

use hdlscope_arch::{ArchitectureCatalog, ComponentKind, DeviceCatalog};

use crate::GlobalArgs;

/// Runs the `hdlscope devices` command.
pub fn run(_global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    print!(
        "{}",
        render(&DeviceCatalog::builtin(), &ArchitectureCatalog::builtin())
    );
    Ok(0)
}

fn render(devices: &DeviceCatalog, archs: &ArchitectureCatalog) -> String {
    let mut out = String::from("Devices:\n");
    for d in devices.iter() {
        out.push_str(&format!(
            "  {:<12} {:<8} {:<16} {:>6} LUT{}  {:>6} FF  {:>4} BRAM  {:>4} DSP  {:>4} MHz\n",
            d.name,
            d.vendor.to_string(),
            d.part,
            d.luts,
            d.lut_inputs,
            d.ffs,
            d.brams,
            d.dsps,
            d.max_frequency_mhz
        ));
    }
    out.push_str("\nArchitectures:\n");
    for kind in ComponentKind::ALL {
        out.push_str(&format!("  {kind}\n"));
        for profile in archs.for_component(kind) {
            out.push_str(&format!(
                "    {:<16} {}\n",
                profile.architecture.to_string(),
                profile.description
            ));
        }
    }
    out
}
