//! Binary entry point for the Basalt CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;

use basalt::{
    Catalog, CatalogError, ClientConfig, Describer, DescribeError, MemoryStore, StoreError,
    VolumeOrigin, VolumeSpec, join_blocks,
};
use basalt::volume::{BYTES_PER_GIB, IoPriority, VolumeFormat};

mod cli;

use cli::{Cli, CreateCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Describe(#[from] DescribeError),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<i32, CliError> {
    let config =
        ClientConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let catalog = Catalog::new(config.catalog_path.clone());
    let store = MemoryStore::from_snapshot(catalog.load()?);
    let mut stdout = io::stdout();

    match cli {
        Cli::Create(args) => {
            let spec = build_create_spec(&config, &args)?;
            let volume = store.create(&spec)?;
            if args.shared {
                store.set_shared(&volume.name, true)?;
            }
            catalog.save(&store.snapshot())?;
            writeln!(stdout, "{}", volume.id).ok();
        }
        Cli::Clone(args) => {
            let spec = derived_spec(&args.name, VolumeOrigin::clone_of(&args.source))?;
            let volume = store.create(&spec)?;
            catalog.save(&store.snapshot())?;
            writeln!(stdout, "{}", volume.id).ok();
        }
        Cli::Snapshot(args) => {
            let spec = derived_spec(&args.name, VolumeOrigin::snapshot_of(&args.source))?;
            let volume = store.create(&spec)?;
            catalog.save(&store.snapshot())?;
            writeln!(stdout, "{}", volume.id).ok();
        }
        Cli::Delete(args) => {
            store.delete(&args.name)?;
            catalog.save(&store.snapshot())?;
        }
        Cli::Attach(args) => {
            store.attach(&args.name)?;
            catalog.save(&store.snapshot())?;
        }
        Cli::Detach(args) => {
            store.detach(&args.name)?;
            catalog.save(&store.snapshot())?;
        }
        Cli::List => {
            for volume in store.list() {
                writeln!(stdout, "{}", volume.name).ok();
            }
        }
        Cli::Describe(args) => {
            let describer = Describer::new(store);
            let blocks = describer.describe(&args.names).await?;
            writeln!(stdout, "{}", join_blocks(&blocks)).ok();
        }
    }

    Ok(0)
}

fn build_create_spec(config: &ClientConfig, args: &CreateCommand) -> Result<VolumeSpec, CliError> {
    config
        .validate()
        .map_err(|err| CliError::Config(err.to_string()))?;
    let format = match &args.format {
        Some(label) => parse_format(label)?,
        None => config
            .format()
            .map_err(|err| CliError::Config(err.to_string()))?,
    };
    let io_priority = match &args.io_priority {
        Some(label) => parse_io_priority(label)?,
        None => config
            .io_priority()
            .map_err(|err| CliError::Config(err.to_string()))?,
    };
    let size_bytes = args.size_gb.map_or_else(
        || config.default_size_bytes(),
        |gb| u64::from(gb) * BYTES_PER_GIB,
    );

    VolumeSpec::builder()
        .name(&args.name)
        .size_bytes(size_bytes)
        .format(format)
        .ha_level(args.ha.unwrap_or(config.default_ha_level))
        .io_priority(io_priority)
        .build()
        .map_err(CliError::from)
}

fn derived_spec(name: &str, origin: VolumeOrigin) -> Result<VolumeSpec, CliError> {
    VolumeSpec::builder()
        .name(name)
        .origin(Some(origin))
        .build()
        .map_err(CliError::from)
}

fn parse_format(label: &str) -> Result<VolumeFormat, CliError> {
    VolumeFormat::from_label(label).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "unknown volume format '{label}'; expected xfs, ext4, or none"
        ))
    })
}

fn parse_io_priority(label: &str) -> Result<IoPriority, CliError> {
    IoPriority::from_label(label).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "unknown IO priority '{label}'; expected none, low, medium, or high"
        ))
    })
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            catalog_path: String::from(".basalt/volumes.json"),
            default_size_gb: 1,
            default_format: String::from("xfs"),
            default_ha_level: 1,
            default_io_priority: String::from("none"),
        }
    }

    fn create_command(name: &str) -> CreateCommand {
        CreateCommand {
            name: name.to_owned(),
            size_gb: None,
            format: None,
            ha: None,
            io_priority: None,
            shared: false,
        }
    }

    #[test]
    fn create_spec_uses_configured_defaults() {
        let spec = build_create_spec(&config(), &create_command("data")).expect("spec");
        assert_eq!(spec.size_bytes, BYTES_PER_GIB);
        assert_eq!(spec.format, VolumeFormat::Xfs);
        assert_eq!(spec.ha_level, 1);
        assert_eq!(spec.io_priority, IoPriority::None);
    }

    #[test]
    fn create_spec_honours_flag_overrides() {
        let args = CreateCommand {
            size_gb: Some(4),
            format: Some(String::from("ext4")),
            ha: Some(2),
            io_priority: Some(String::from("high")),
            ..create_command("data")
        };

        let spec = build_create_spec(&config(), &args).expect("spec");
        assert_eq!(spec.size_bytes, 4 * BYTES_PER_GIB);
        assert_eq!(spec.format, VolumeFormat::Ext4);
        assert_eq!(spec.ha_level, 2);
        assert_eq!(spec.io_priority, IoPriority::High);
    }

    #[test]
    fn create_spec_rejects_unknown_format_label() {
        let args = CreateCommand {
            format: Some(String::from("zfs")),
            ..create_command("data")
        };

        let err = build_create_spec(&config(), &args).expect_err("format should be rejected");
        assert!(
            matches!(err, CliError::InvalidArgument(ref message) if message.contains("zfs")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn write_error_renders_the_cli_error() {
        let mut buf = Vec::new();
        let err = CliError::Store(StoreError::NotFound {
            name: String::from("data"),
        });
        write_error(&mut buf, &err);
        let rendered = String::from_utf8(buf).expect("utf8");
        assert!(
            rendered.contains("volume data not found"),
            "rendered: {rendered}"
        );
    }
}
