// Tests for the adb bridge
// Focus: argument lists sent to adb, exit-code handling, error mapping

#[cfg(test)]
mod bridge_tests {
    use super::super::error::AdbError;
    use super::super::testing::ScriptedRunner;
    use super::super::types::Device;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // ============================================================
    // DEVICE LISTING
    // ============================================================

    #[tokio::test]
    async fn test_list_devices_parses_rows() {
        let shell = ScriptedRunner::new()
            .ok("List of devices attached\nemulator-5554\tdevice\nR58M\tunauthorized\n\n")
            .into_shell();

        let devices = shell.list_devices().await.unwrap();

        assert_eq!(
            devices,
            vec![
                Device::new("emulator-5554", "device"),
                Device::new("R58M", "unauthorized"),
            ]
        );
        assert_eq!(shell.runner().calls(), vec![args(&["devices"])]);
    }

    #[tokio::test]
    async fn test_list_devices_header_only_is_empty() {
        let shell = ScriptedRunner::new()
            .ok("List of devices attached\n\n")
            .into_shell();
        assert!(shell.list_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_devices_nonzero_exit_is_error() {
        let shell = ScriptedRunner::new()
            .fail("cannot connect to daemon")
            .into_shell();

        let err = shell.list_devices().await.unwrap_err();
        match err {
            AdbError::CommandFailed { command, stderr } => {
                assert_eq!(command, "adb devices");
                assert_eq!(stderr, "cannot connect to daemon");
            }
            other => panic!("Expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_not_found() {
        let shell = ScriptedRunner::new().missing_binary().into_shell();

        let err = shell.ensure_available().await.unwrap_err();
        assert!(err.is_adb_missing(), "Should report missing adb: {err}");
        assert!(matches!(err, AdbError::NotFound { path } if path == PathBuf::from("adb")));
    }

    // ============================================================
    // PACKAGE LISTING
    // ============================================================

    #[tokio::test]
    async fn test_list_packages_skips_malformed_lines() {
        let shell = ScriptedRunner::new()
            .ok("package:com.a\npackage:com.b\nmalformed\n")
            .into_shell();

        let packages = shell.list_packages().await.unwrap();

        assert_eq!(packages, vec!["com.a", "com.b"]);
        assert_eq!(
            shell.runner().calls(),
            vec![args(&["shell", "pm", "list", "packages"])]
        );
    }

    #[tokio::test]
    async fn test_list_packages_without_device_is_empty_not_error() {
        let shell = ScriptedRunner::new()
            .fail("adb: no devices/emulators found")
            .into_shell();
        assert!(shell.list_packages().await.unwrap().is_empty());
    }

    // ============================================================
    // UNINSTALL / REBOOT
    // ============================================================

    #[tokio::test]
    async fn test_uninstall_targets_user_zero() {
        let shell = ScriptedRunner::new().ok("Success\n").into_shell();

        let out = shell.uninstall("com.facebook.katana").await.unwrap();

        assert_eq!(out, "Success\n");
        assert_eq!(
            shell.runner().calls(),
            vec![args(&[
                "shell",
                "pm",
                "uninstall",
                "--user",
                "0",
                "com.facebook.katana"
            ])]
        );
    }

    #[tokio::test]
    async fn test_uninstall_rejects_blank_name_without_running_adb() {
        let shell = ScriptedRunner::new().into_shell();
        let err = shell.uninstall("   ").await.unwrap_err();
        assert!(matches!(err, AdbError::EmptyPackageName));
        assert!(shell.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_reboot_success_and_failure() {
        let shell = ScriptedRunner::new()
            .ok("")
            .fail("error: device offline")
            .into_shell();

        assert!(shell.reboot().await.is_ok());
        let err = shell.reboot().await.unwrap_err();
        assert_eq!(err.to_string(), "'adb reboot' failed: error: device offline");
    }

    // ============================================================
    // APK PATHS / INSTALL
    // ============================================================

    #[tokio::test]
    async fn test_apk_paths_collects_splits() {
        let shell = ScriptedRunner::new()
            .ok("package:/data/app/com.a-1/base.apk\npackage:/data/app/com.a-1/split_config.arm64_v8a.apk\n")
            .into_shell();

        let paths = shell.apk_paths("com.a").await.unwrap();
        assert_eq!(
            paths,
            vec![
                "/data/app/com.a-1/base.apk",
                "/data/app/com.a-1/split_config.arm64_v8a.apk"
            ]
        );
    }

    #[tokio::test]
    async fn test_apk_paths_empty_output_is_error() {
        let shell = ScriptedRunner::new().ok("\n").into_shell();
        let err = shell.apk_paths("com.gone").await.unwrap_err();
        assert!(matches!(err, AdbError::NoApkPaths { package } if package == "com.gone"));
    }

    #[tokio::test]
    async fn test_install_requires_success_text() {
        let shell = ScriptedRunner::new()
            .ok("Performing Streamed Install\nSuccess\n")
            .ok("Performing Streamed Install\n")
            .into_shell();
        let apk = vec![PathBuf::from("/backups/com.a-1/base.apk")];

        assert!(shell.install(&apk).await.is_ok());
        let err = shell.install(&apk).await.unwrap_err();
        assert!(matches!(err, AdbError::InstallFailed { .. }));
    }
}
