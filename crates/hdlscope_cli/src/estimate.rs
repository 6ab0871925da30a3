//! `hdlscope estimate` and `hdlscope advise`: single-component estimation.

use hdlscope_advisor::{Optimization, OptimizationAdvisor};
use hdlscope_arch::{ArchitectureCatalog, DeviceCatalog};
use hdlscope_config::HdlscopeConfig;
use hdlscope_estimate::{
    EstimateConfig, EstimateError, Estimates, EstimationEngine, OperatingPoint,
};

use crate::pipeline::load_settings;
use crate::{EstimateArgs, GlobalArgs, ReportFormat};

/// Runs the `hdlscope estimate` command.
pub fn run_estimate(
    args: &EstimateArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global, None)?;
    let request = build_request(args, &config)?;
    let devices = DeviceCatalog::builtin();
    let archs = ArchitectureCatalog::builtin();
    let engine = EstimationEngine::new(&devices, &archs);

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Estimating {}", describe(&request));
    }
    let estimates = engine.estimate_all(&request)?;

    match args.format {
        ReportFormat::Text => print!("{}", render_estimates(&estimates)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&estimates)?),
    }
    Ok(0)
}

/// Runs the `hdlscope advise` command.
pub fn run_advise(
    args: &EstimateArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global, None)?;
    let request = build_request(args, &config)?;
    let devices = DeviceCatalog::builtin();
    let archs = ArchitectureCatalog::builtin();
    let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs))
        .with_settings(&config.advisor);

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Advising on {}", describe(&request));
    }
    let candidates = advisor.suggest_alternatives(&request)?;

    match args.format {
        ReportFormat::Text => print!("{}", render_candidates(&candidates)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&candidates)?),
    }
    Ok(0)
}

/// Combines the `[estimate]` config section with command-line overrides.
fn build_request(
    args: &EstimateArgs,
    config: &HdlscopeConfig,
) -> Result<EstimateConfig, EstimateError> {
    let mut point = OperatingPoint::from_section(&config.estimate)?;
    if let Some(device) = &args.device {
        point.device = device.clone();
    }
    if let Some(frequency) = args.frequency {
        point.frequency_mhz = frequency.mhz();
    }
    if let Some(t) = args.temperature {
        point.temperature_c = t;
    }
    if let Some(v) = args.voltage {
        point.voltage_v = v;
    }
    if let Some(grade) = args.speed_grade {
        point.speed_grade = grade;
    }

    let mut request = EstimateConfig::new(args.component, args.width)
        .with_instances(args.instances)
        .with_point(point);
    if let Some(arch) = args.arch {
        request = request.with_architecture(arch);
    }
    if let Some(depth) = args.depth {
        request = request.with_depth(depth);
    }
    Ok(request)
}

fn describe(request: &EstimateConfig) -> String {
    let arch = request
        .architecture
        .map(|a| a.to_string())
        .unwrap_or_else(|| "generic".to_string());
    let depth = request
        .depth
        .map(|d| format!(" x {d}"))
        .unwrap_or_default();
    format!(
        "{} ({arch}) width {}{depth} on {} at {} MHz",
        request.component, request.width, request.point.device, request.point.frequency_mhz
    )
}

fn render_estimates(e: &Estimates) -> String {
    let r = &e.resources;
    let t = &e.timing;
    let p = &e.power;
    let th = &e.thermal;
    let mut out = String::new();
    out.push_str(&format!("device      {}\n", r.device));
    out.push_str(&format!(
        "resources   {} LUTs, {} FFs, {} BRAMs, {} DSPs ({:.2}% peak utilization)\n",
        r.luts,
        r.ffs,
        r.brams,
        r.dsps,
        r.utilization.peak()
    ));
    out.push_str(&format!(
        "timing      {:.3} ns ({} levels), {:.1} MHz max, slack {:.3} ns\n",
        t.total_delay_ns, t.logic_levels, t.max_frequency_mhz, t.setup_slack_ns
    ));
    out.push_str(&format!(
        "power       {:.2} mW ({:.2} static, {:.2} dynamic)\n",
        p.total_mw, p.static_mw, p.dynamic_mw
    ));
    out.push_str(&format!(
        "thermal     {:.1} °C junction, {:.1} °C margin ({})\n",
        th.junction_c, th.margin_c, th.status
    ));
    out
}

fn render_candidates(candidates: &[Optimization]) -> String {
    if candidates.is_empty() {
        return "no alternatives\n".to_string();
    }
    let mut out = String::new();
    for (rank, c) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. score {:.3}  {}\n    {:.1} MHz ({:+.1}), {} LUTs ({:+}), {:.2} mW ({:+.2})\n",
            rank + 1,
            c.score,
            c.description,
            c.frequency_mhz,
            c.frequency_delta_mhz,
            c.luts,
            c.lut_delta,
            c.power_mw,
            c.power_delta_mw
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_arch::{Architecture, ComponentKind, SpeedGrade};
    use hdlscope_common::Frequency;

    fn args(component: ComponentKind, width: u32) -> EstimateArgs {
        EstimateArgs {
            component,
            arch: None,
            width,
            depth: None,
            instances: 1,
            device: None,
            frequency: None,
            temperature: None,
            voltage: None,
            speed_grade: None,
            format: ReportFormat::Text,
        }
    }

    #[test]
    fn request_uses_config_defaults() {
        let config = hdlscope_config::load_config_from_str(
            "[estimate]\ndevice = \"Cyclone-V\"\nfrequency = \"150MHz\"\n",
        )
        .unwrap();
        let request = build_request(&args(ComponentKind::Adder, 16), &config).unwrap();
        assert_eq!(request.point.device, "Cyclone-V");
        assert!((request.point.frequency_mhz - 150.0).abs() < 1e-9);
        assert_eq!(request.architecture, None);
    }

    #[test]
    fn flags_override_config() {
        let config = hdlscope_config::load_config_from_str(
            "[estimate]\ndevice = \"Cyclone-V\"\nfrequency = \"150MHz\"\n",
        )
        .unwrap();
        let mut a = args(ComponentKind::Fifo, 32);
        a.arch = Some(Architecture::BlockRam);
        a.depth = Some(512);
        a.device = Some("Kintex-7".into());
        a.frequency = Some(Frequency::from_mhz(250.0));
        a.speed_grade = Some(SpeedGrade::Fastest);
        let request = build_request(&a, &config).unwrap();
        assert_eq!(request.point.device, "Kintex-7");
        assert!((request.point.frequency_mhz - 250.0).abs() < 1e-9);
        assert_eq!(request.point.speed_grade, SpeedGrade::Fastest);
        assert_eq!(request.architecture, Some(Architecture::BlockRam));
        assert_eq!(request.depth, Some(512));
    }

    #[test]
    fn rendered_estimates_name_every_section() {
        let devices = DeviceCatalog::builtin();
        let archs = ArchitectureCatalog::builtin();
        let engine = EstimationEngine::new(&devices, &archs);
        let request = build_request(
            &args(ComponentKind::Counter, 8),
            &HdlscopeConfig::default(),
        )
        .unwrap();
        let text = render_estimates(&engine.estimate_all(&request).unwrap());
        for label in ["device", "resources", "timing", "power", "thermal"] {
            assert!(text.contains(label), "missing {label} in:\n{text}");
        }
    }

    #[test]
    fn empty_candidate_list_renders_placeholder() {
        assert_eq!(render_candidates(&[]), "no alternatives\n");
    }
}
