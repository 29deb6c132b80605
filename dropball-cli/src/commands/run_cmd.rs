use std::path::PathBuf;

use dropball_web::physics::BodyState;
use dropball_web::{Demo, TickReport};

use crate::project;

pub fn run(frames: u64, dt: f32, every: u64, config: Option<PathBuf>) -> anyhow::Result<()> {
    if !(dt.is_finite() && dt >= 0.0) {
        anyhow::bail!("--dt must be a non-negative number of seconds, got {dt}");
    }
    if every == 0 {
        anyhow::bail!("--every must be at least 1");
    }

    let (config, source) = project::load_config(config.as_deref())?;
    println!("Config: {}", source.label());

    let mut demo = Demo::new(config).map_err(anyhow::Error::msg)?;
    let mut resets = 0u64;

    for tick in 1..=frames {
        let report = demo.tick(dt);
        if report.reset {
            resets += 1;
        }
        if report.reset || tick % every == 0 {
            println!("{}", status_line(tick, &report, demo.sphere_state()));
        }
    }

    println!("Done: {frames} frames, {resets} resets");
    Ok(())
}

/// One line of headless output.
pub fn status_line(tick: u64, report: &TickReport, sphere: Option<BodyState>) -> String {
    let body = match sphere {
        Some(s) => format!(
            "pos ({:>7.3}, {:>7.3}, {:>7.3})  speed {:>6.3}",
            s.position.x,
            s.position.y,
            s.position.z,
            s.linear_velocity.length(),
        ),
        None => "no body".to_string(),
    };
    let marker = if report.reset { "  RESET" } else { "" };
    format!(
        "tick {tick:>6}  frame {:>4}  {body}  lines {:>3}{marker}",
        report.frame, report.debug_segments,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_status_line_contents() {
        let report = TickReport {
            frame: 12,
            reset: false,
            debug_segments: 40,
            dt: 0.016,
        };
        let sphere = BodyState {
            position: Vec3::new(2.5, 5.0, 0.0),
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::new(0.0, -3.0, 4.0),
            angular_velocity: Vec3::ZERO,
        };
        let line = status_line(7, &report, Some(sphere));
        assert!(line.contains("tick      7"), "{line}");
        assert!(line.contains("frame   12"), "{line}");
        assert!(line.contains("5.000"), "{line}");
        assert!(line.contains("speed  5.000"), "{line}");
        assert!(!line.contains("RESET"));
    }

    #[test]
    fn test_status_line_marks_reset() {
        let report = TickReport {
            frame: 0,
            reset: true,
            debug_segments: 0,
            dt: 0.016,
        };
        let line = status_line(351, &report, None);
        assert!(line.ends_with("RESET"), "{line}");
        assert!(line.contains("no body"));
    }

    #[test]
    fn test_headless_run_with_defaults_resets() {
        let mut demo = Demo::new(dropball_web::DemoConfig::default()).unwrap();
        let resets = (0..702).filter(|_| demo.tick(1.0 / 60.0).reset).count();
        assert_eq!(resets, 2);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(run(1, -1.0, 1, None).is_err());
        assert!(run(1, 0.1, 0, None).is_err());
    }
}
