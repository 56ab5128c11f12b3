//! zpool-exporter: Prometheus exporter for logical I/O statistics of ZFS
//! storage pools.

use clap::Parser;

use zpool_exporter_core::DEFAULT_PORT;
use zpool_exporter_core::collector::{ExporterOptions, PoolCollector};
use zpool_exporter_core::runner::ZpoolRunner;

#[derive(Parser)]
#[command(name = "zpool-exporter")]
#[command(about = "Prometheus exporter for logical I/O statistics of ZFS storage pools")]
#[command(version = zpool_exporter_core::VERSION)]
struct Cli {
    /// Logging level
    #[arg(
        long = "log",
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["debug", "info", "warn", "error"]
    )]
    log_level: String,

    /// Pools to include in collection (default = all pools)
    #[arg(long = "pools", value_name = "NAME", num_args = 0..)]
    pools: Vec<String>,

    /// Address and port to listen on
    #[arg(long = "web.listen-address", value_name = "ADDR", default_value = ":10007")]
    listen_address: String,

    /// Include average latency statistics (see: zpool iostat -l)
    #[arg(short = 'l')]
    latency: bool,

    /// Include active queue statistics (see: zpool iostat -q)
    #[arg(short = 'q')]
    queue: bool,

    /// Include latency histograms (see: zpool iostat -w)
    #[arg(short = 'w')]
    latency_histogram: bool,

    /// Include request size histograms for the leaf vdev's I/O (see: zpool iostat -r)
    #[arg(short = 'r')]
    request_size_histogram: bool,
}

fn init_logging(level: &str) {
    let filter = match level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };
    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .init();
}

/// Split a `host:port` listen address. Either side may be omitted:
/// `:10007`, `127.0.0.1` and `127.0.0.1:9134` are all accepted.
fn split_listen_address(addr: &str) -> Result<(String, u16), String> {
    let (host, port) = match addr.rsplit_once(':') {
        Some((host, port)) => (host, port),
        None => (addr, ""),
    };

    let host = if host.is_empty() { "0.0.0.0" } else { host };
    let port = if port.is_empty() {
        DEFAULT_PORT
    } else {
        port.parse::<u16>()
            .map_err(|_| format!("invalid listen address '{addr}': bad port '{port}'"))?
    };

    Ok((host.to_string(), port))
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let (host, port) = match split_listen_address(&cli.listen_address) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let options = ExporterOptions {
        pools: cli.pools,
        latency: cli.latency,
        queue: cli.queue,
        latency_histogram: cli.latency_histogram,
        request_size_histogram: cli.request_size_histogram,
    };

    println!("zpool-exporter v{}", zpool_exporter_core::VERSION);
    println!("   http://{host}:{port}/metrics");
    println!();
    println!("   Tables collected per scrape:");
    println!("     zpool list -H -p            pool summary");
    let mut iostat = String::from("zpool iostat -H -p");
    if options.latency {
        iostat.push_str(" -l");
    }
    if options.queue {
        iostat.push_str(" -q");
    }
    println!("     {iostat:<27} I/O statistics");
    if options.latency_histogram {
        println!("     zpool iostat -w -p -H       latency histograms");
    }
    if options.request_size_histogram {
        println!("     zpool iostat -r -p -H       request size histograms");
    }
    if !options.pools.is_empty() {
        println!("   Restricted to pools: {}", options.pools.join(", "));
    }
    println!();

    let collector = PoolCollector::new(options, ZpoolRunner::new());

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            log::error!("failed to start runtime: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = rt.block_on(zpool_exporter_server::run_server(collector, &host, port)) {
        log::error!("exporter shut down: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_address_defaults() {
        assert_eq!(split_listen_address(":10007").unwrap(), ("0.0.0.0".to_string(), 10007));
        assert_eq!(split_listen_address(":").unwrap(), ("0.0.0.0".to_string(), DEFAULT_PORT));
        assert_eq!(
            split_listen_address("127.0.0.1").unwrap(),
            ("127.0.0.1".to_string(), DEFAULT_PORT)
        );
    }

    #[test]
    fn test_listen_address_with_host_and_port() {
        assert_eq!(
            split_listen_address("192.168.1.10:9134").unwrap(),
            ("192.168.1.10".to_string(), 9134)
        );
    }

    #[test]
    fn test_listen_address_rejects_bad_port() {
        assert!(split_listen_address(":notaport").is_err());
        assert!(split_listen_address("host:99999").is_err());
    }

    #[test]
    fn test_cli_parses_full_flag_set() {
        let cli = Cli::parse_from([
            "zpool-exporter",
            "--log",
            "info",
            "--pools",
            "tank",
            "backup",
            "-l",
            "-q",
            "-w",
            "-r",
        ]);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.pools, vec!["tank", "backup"]);
        assert!(cli.latency && cli.queue);
        assert!(cli.latency_histogram && cli.request_size_histogram);
    }
}
