//! Host identifier resolution.
//!
//! Every emitted value carries the host it was collected on. The kernel
//! exposes it under `/proc/sys/kernel/hostname`, which is read through the
//! collector's `FileSystem` so mocks control it in tests.

use std::path::Path;

use tracing::debug;

use crate::collector::traits::FileSystem;

/// Host name used when the kernel one cannot be read.
const FALLBACK_HOSTNAME: &str = "localhost";

/// Returns the host name from `<proc_path>/sys/kernel/hostname`.
///
/// Falls back to `localhost` when the file is missing or blank.
pub fn resolve_hostname<F: FileSystem>(fs: &F, proc_path: &Path) -> String {
    let path = proc_path.join("sys/kernel/hostname");
    match fs.read_to_string(&path) {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => {
            debug!("{} is empty, using {}", path.display(), FALLBACK_HOSTNAME);
            FALLBACK_HOSTNAME.to_string()
        }
        Err(e) => {
            debug!("Cannot read {}: {}, using {}", path.display(), e, FALLBACK_HOSTNAME);
            FALLBACK_HOSTNAME.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_resolve_hostname_from_proc() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/sys/kernel/hostname", "web-3\n");
        assert_eq!(resolve_hostname(&fs, Path::new("/proc")), "web-3");
    }

    #[test]
    fn test_resolve_hostname_custom_proc_path() {
        let mut fs = MockFs::new();
        fs.add_file("/host/proc/sys/kernel/hostname", "node-b");
        assert_eq!(resolve_hostname(&fs, Path::new("/host/proc")), "node-b");
    }

    #[test]
    fn test_resolve_hostname_fallback() {
        let fs = MockFs::new();
        assert_eq!(resolve_hostname(&fs, Path::new("/proc")), "localhost");

        let mut fs = MockFs::new();
        fs.add_file("/proc/sys/kernel/hostname", "  \n");
        assert_eq!(resolve_hostname(&fs, Path::new("/proc")), "localhost");
    }
}
