use cmake_meta_version::{detect_or_default, read_version, write_version};

fn main() {
    env_logger::init();

    println!("Testing cmake-meta-version round trip...");

    let samples = [
        ("LF", "# header\nset(META_VERSION_MAJOR       \"0\")\nset(META_VERSION_MINOR       \"9\")\nset(META_VERSION_PATCH       \"1\")\n# footer\n"),
        ("CRLF", "# header\r\nset(META_VERSION_MAJOR       \"0\")\r\nset(META_VERSION_MINOR       \"9\")\r\nset(META_VERSION_PATCH       \"1\")\r\n# footer\r\n"),
    ];

    let mut failures = 0;

    for (name, contents) in samples {
        let current = read_version(contents);
        if current == "0.9.1" {
            println!("✓ {}: read {}", name, current);
        } else {
            println!("✗ {}: expected 0.9.1, read {}", name, current);
            failures += 1;
        }

        let updated = write_version(contents, "1.0.0");
        let reread = read_version(&updated);
        if reread == "1.0.0" {
            println!("✓ {}: wrote and re-read {}", name, reread);
        } else {
            println!("✗ {}: expected 1.0.0 after write, read {}", name, reread);
            failures += 1;
        }

        if detect_or_default(&updated) == detect_or_default(contents) {
            println!("✓ {}: line endings preserved ({})", name, detect_or_default(&updated));
        } else {
            println!("✗ {}: line endings changed", name);
            failures += 1;
        }
    }

    if failures == 0 {
        println!("Round trip test complete!");
    } else {
        println!("Round trip test finished with {} failure(s)", failures);
        std::process::exit(1);
    }
}
