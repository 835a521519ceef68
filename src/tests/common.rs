// src/tests/common.rs

//! Shared fixtures for `walalib` tests.

use std::fs;
use std::path::Path;

use ::tempfile::TempDir;

/// Ten well-formed combined-log lines. Designed splits:
///
/// - 8 lines request `/downloads/product_1`; one each requests
///   `/downloads/product_2` and `/downloads/product_3`
/// - 3 distinct response codes: 304 ×5, 200 ×4, 404 ×1
/// - user `usr` appears 5 times, `-` 5 times
/// - IP `93.180.71.3` appears 4 times (unique maximum)
/// - 2 lines dated on or before 2011-05-17, 8 on or after 2012-05-17,
///   5 inside [2019-05-17, 2022-05-17]
/// - sizes 0, 490, 85, 120, 150, 200, 230, 300, 333, 404:
///   sum 2312, maximum 490 (the nearest-rank 95p of ten values)
/// - 6 lines carry a `Debian APT-HTTP/1.3` user agent
pub const NGINX_10_LINES: &str = "\
93.180.71.3 - - [17/May/2010:08:05:32 +0000] \"GET /downloads/product_1 HTTP/1.1\" 304 0 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"
217.168.17.5 - usr [16/May/2011:08:05:32 +0000] \"GET /downloads/product_1 HTTP/1.1\" 200 490 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"
93.180.71.3 - usr [17/May/2015:08:05:23 +0000] \"GET /downloads/product_1 HTTP/1.1\" 304 85 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"
217.168.17.5 - - [17/May/2015:08:05:34 +0000] \"GET /downloads/product_2 HTTP/1.1\" 200 120 \"-\" \"Mozilla/5.0 (X11; Linux x86_64)\"
80.91.33.133 - usr [17/May/2015:08:05:57 +0000] \"GET /downloads/product_1 HTTP/1.1\" 304 150 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"
93.180.71.3 - - [18/May/2019:08:05:32 +0000] \"GET /downloads/product_1 HTTP/1.1\" 404 200 \"-\" \"Mozilla/5.0 (X11; Linux x86_64)\"
80.91.33.133 - usr [10/Oct/2019:08:05:32 +0000] \"GET /downloads/product_1 HTTP/1.1\" 304 230 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"
217.168.17.5 - - [17/May/2020:08:05:32 +0000] \"GET /downloads/product_3 HTTP/1.1\" 200 300 \"-\" \"curl/7.68.0\"
93.180.71.3 - usr [01/Jun/2021:08:05:32 +0000] \"GET /downloads/product_1 HTTP/1.1\" 200 333 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"
80.91.33.133 - - [16/May/2022:08:05:32 +0000] \"GET /downloads/product_1 HTTP/1.1\" 304 404 \"-\" \"Mozilla/5.0 (X11; Linux x86_64)\"
";

/// One well-formed line for single-line assertions.
pub const NGINX_LINE: &str = "93.180.71.3 - - [17/May/2015:08:05:32 +0000] \
\"GET /downloads/product_1 HTTP/1.1\" 304 0 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"";

/// Write `content` to `<dir>/<relative>`, creating parent directories.
pub fn write_file(
    dir: &Path,
    relative: &str,
    content: &str,
) -> String {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();

    path.to_string_lossy().into_owned()
}

/// A tempdir holding `logs/10_lines_test.log` with [`NGINX_10_LINES`].
/// Returns the tempdir (keep it alive!) and the file's full path.
pub fn fixture_dir() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "logs/10_lines_test.log", NGINX_10_LINES);

    (dir, path)
}
