//! Shared constants for test infrastructure

pub const OWNER: &str = "daan-gunnink";
pub const REPO: &str = "toJot";

pub const LATEST_RELEASE_PATH: &str = "/repos/daan-gunnink/toJot/releases/latest";

pub const VERSION_1_0_0: &str = "1.0.0";
pub const VERSION_1_2_0: &str = "1.2.0";
pub const VERSION_1_10_0: &str = "1.10.0";

pub const TAG_V1_2_0: &str = "v1.2.0";
pub const TAG_V1_10_0: &str = "v1.10.0";

pub const ASSET_LINUX_BINARY: &str = "tojot-linux-amd64";
pub const ASSET_LINUX_DEB: &str = "tojot_1.10.0_amd64.deb";
pub const ASSET_LINUX_APPIMAGE: &str = "toJot-x86_64.AppImage";
pub const ASSET_LINUX_TARBALL: &str = "tojot-linux-amd64.tar.gz";
pub const ASSET_DARWIN_DMG: &str = "toJot-1.10.0.dmg";
pub const ASSET_DARWIN_PKG: &str = "toJot-1.10.0.pkg";
pub const ASSET_DARWIN_UNIVERSAL: &str = "tojot-darwin-universal";
pub const ASSET_WINDOWS_MSI: &str = "toJot-1.10.0.msi";
pub const ASSET_WINDOWS_SETUP: &str = "toJot-windows-amd64-installer.exe";
pub const ASSET_CHECKSUMS: &str = "checksums.txt";

pub const ARTIFACT_CONTENT: &[u8] = b"#!/bin/sh\necho tojot\n";
