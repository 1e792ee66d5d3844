//! Version command

use crate::cli::VersionArgs;
use crate::version::VersionInfo;
use anyhow::Result;

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.display());

        if info.is_overridden() {
            println!("Build:      {}", info.build_version);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_display_contains_version() {
        let info = VersionInfo::current();
        assert!(info.display().starts_with("tojot "));
        assert!(info.display().contains(&info.version));
    }

    #[test]
    fn test_version_info_display_trait() {
        let info = VersionInfo::current();
        assert_eq!(format!("{}", info), info.display());
    }

    #[test]
    fn test_version_info_display_with_all_fields() {
        let info = VersionInfo {
            version: "9.9.9".to_string(),
            build_version: "0.4.0".to_string(),
            os: "linux".to_string(),
            arch: "x86_64".to_string(),
        };
        assert_eq!(info.display(), "tojot 9.9.9 (linux-x86_64)");
        assert!(info.is_overridden());
    }

    #[test]
    fn test_version_info_json_serialization() {
        let info = VersionInfo::current();
        let json = serde_json::to_string(&info).expect("should serialize to JSON");
        let deserialized: VersionInfo =
            serde_json::from_str(&json).expect("should deserialize from JSON");
        assert_eq!(deserialized.build_version, info.build_version);
    }
}
