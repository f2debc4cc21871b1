//! Build script for panel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml and bakes it into `panel_config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values extracted from panel.toml
struct BoardValues {
    baudrate: i64,
    stop_bits: i64,
    frequency_hz: i64,
    display_address: i64,
    power_settle_ticks: i64,
    step_divider: i64,
}

/// Validate panel.toml and write the generated config
fn generate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml board configuration file.    ║\n\
            ║  Please create one in the panel-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let values = validate(&config);
    write_config(&values);

    println!("cargo:warning=panel.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Look up `section.key` and check it is an integer within `range`
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return *range.start();
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            return *range.start();
        }
    };

    match table.get(key) {
        Some(toml::Value::Integer(value)) if range.contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            *range.start()
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            *range.start()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            *range.start()
        }
    }
}

/// Check every field, reporting all problems at once
fn validate(config: &toml::Value) -> BoardValues {
    let mut errors = Vec::new();

    let values = BoardValues {
        baudrate: integer(config, "serial", "baudrate", 1200..=921_600, &mut errors),
        stop_bits: integer(config, "serial", "stop_bits", 1..=2, &mut errors),
        frequency_hz: integer(config, "bus", "frequency_hz", 10_000..=1_000_000, &mut errors),
        display_address: integer(config, "bus", "display_address", 0x08..=0x77, &mut errors),
        power_settle_ticks: integer(
            config,
            "display",
            "power_settle_ticks",
            1..=u16::MAX as i64,
            &mut errors,
        ),
        step_divider: integer(config, "motor", "step_divider", 1..=u8::MAX as i64, &mut errors),
    };

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    values
}

/// Emit `const CONFIG: PanelConfig` into OUT_DIR
fn write_config(values: &BoardValues) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let source = format!(
        "/// Board configuration generated from panel.toml\n\
        pub const CONFIG: PanelConfig = PanelConfig {{\n    \
            baudrate: {},\n    \
            stop_bits: {},\n    \
            bus_frequency_hz: {},\n    \
            display_address: {:#04x},\n    \
            power_settle_ticks: {},\n    \
            motor_step_divider: {},\n\
        }};\n",
        values.baudrate,
        values.stop_bits,
        values.frequency_hz,
        values.display_address,
        values.power_settle_ticks,
        values.step_divider,
    );

    fs::write(out_dir.join("panel_config.rs"), source).unwrap();
}
