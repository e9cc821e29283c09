//! Command-line configuration: `--key=value` flags plus one positional
//! model path.

use std::path::PathBuf;

use anyhow::{Result, bail};
use asset::UvLookup;
use platform::ViewerOptions;

#[derive(Clone, Debug)]
pub struct Config {
    pub model: PathBuf,
    pub texture: Option<PathBuf>,
    pub uv_lookup: UvLookup,
    /// Print a summary and exit instead of opening a window.
    pub info_only: bool,
    pub viewer: ViewerOptions,
}

pub const USAGE: &str = "\
usage: app [--model=]PATH [--texture=PNG] [--uv-lookup=position|slot]
           [--gpu-backend=auto|vulkan|dx12|metal|gl] [--size=WxH]
           [--width=N] [--height=N] [--show-fps[=on|off]] [--info]";

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut model: Option<PathBuf> = None;
    let mut texture = None;
    let mut uv_lookup = UvLookup::default();
    let mut info_only = false;
    let mut viewer = ViewerOptions::default();
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        let arg = arg.as_ref();
        if let Some(v) = arg.strip_prefix("--model=") {
            model = Some(PathBuf::from(v));
        } else if let Some(v) = arg.strip_prefix("--texture=") {
            texture = Some(PathBuf::from(v));
        } else if let Some(v) = arg.strip_prefix("--uv-lookup=") {
            uv_lookup = parse_uv_lookup(v)?;
        } else if let Some(v) = arg.strip_prefix("--gpu-backend=") {
            viewer.backends = parse_backend(v);
        } else if arg == "--show-fps" {
            viewer.show_fps = true;
        } else if let Some(v) = arg.strip_prefix("--show-fps=") {
            viewer.show_fps = matches!(
                v.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        } else if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        } else if arg == "--info" {
            info_only = true;
        } else if arg.starts_with("--") {
            log::warn!("Ignoring unknown flag '{}'", arg);
        } else if model.is_none() {
            model = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected extra argument '{arg}'\n{USAGE}");
        }
    }

    // Zero is as malformed as text: keep the default.
    viewer.width = w.filter(|&v| v > 0).unwrap_or(viewer.width);
    viewer.height = h.filter(|&v| v > 0).unwrap_or(viewer.height);

    let Some(model) = model else {
        bail!("no model given\n{USAGE}");
    };

    Ok(Config {
        model,
        texture,
        uv_lookup,
        info_only,
        viewer,
    })
}

fn parse_uv_lookup(value: &str) -> Result<UvLookup> {
    match value.to_ascii_lowercase().as_str() {
        "position" | "position-keyed" => Ok(UvLookup::PositionKeyed),
        "slot" | "slot-keyed" => Ok(UvLookup::SlotKeyed),
        other => bail!("unknown uv lookup '{other}' (expected position|slot)"),
    }
}

fn parse_backend(value: &str) -> wgpu::Backends {
    match value.to_ascii_lowercase().as_str() {
        "auto" => wgpu::Backends::all(),
        "vulkan" | "vk" => wgpu::Backends::VULKAN,
        "dx12" | "d3d12" => wgpu::Backends::DX12,
        "metal" | "mtl" => wgpu::Backends::METAL,
        "gl" | "opengl" | "gles" => wgpu::Backends::GL,
        other => {
            log::warn!("Unknown backend '{}', falling back to auto.", other);
            wgpu::Backends::all()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_with_positional_model() {
        let cfg = parse_args(["assets/models/cube.obj"]).unwrap();
        assert_eq!(cfg.model, PathBuf::from("assets/models/cube.obj"));
        assert_eq!(cfg.uv_lookup, UvLookup::PositionKeyed);
        assert!(cfg.texture.is_none());
        assert!(!cfg.info_only);
        assert_eq!((cfg.viewer.width, cfg.viewer.height), (1280, 720));
        assert_eq!(cfg.viewer.backends, wgpu::Backends::all());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse_args([
            "--model=a.obj",
            "--texture=a.png",
            "--uv-lookup=slot",
            "--gpu-backend=vk",
            "--size=800x600",
            "--show-fps",
            "--info",
        ])
        .unwrap();
        assert_eq!(cfg.model, PathBuf::from("a.obj"));
        assert_eq!(cfg.texture, Some(PathBuf::from("a.png")));
        assert_eq!(cfg.uv_lookup, UvLookup::SlotKeyed);
        assert_eq!(cfg.viewer.backends, wgpu::Backends::VULKAN);
        assert_eq!((cfg.viewer.width, cfg.viewer.height), (800, 600));
        assert!(cfg.viewer.show_fps);
        assert!(cfg.info_only);
    }

    #[test]
    fn bad_sizes_fall_back() {
        let cfg = parse_args(["m.obj", "--size=wide", "--height=0"]).unwrap();
        assert_eq!((cfg.viewer.width, cfg.viewer.height), (1280, 720));

        let cfg = parse_args(["m.obj", "--size=0x600"]).unwrap();
        assert_eq!((cfg.viewer.width, cfg.viewer.height), (1280, 600));
    }

    #[test]
    fn missing_model_and_bad_lookup_are_errors() {
        assert!(parse_args(Vec::<String>::new()).is_err());
        assert!(parse_args(["m.obj", "--uv-lookup=diagonal"]).is_err());
        assert!(parse_args(["m.obj", "n.obj"]).is_err());
    }
}
