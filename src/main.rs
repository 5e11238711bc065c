//! Tethys Iceberg entry point
//!
//! Headless native driver: builds the engine, feeds it a point total and
//! runs the tick loop for a while, then prints the last frame as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use tethys_iceberg::renderer::SceneVertices;
    use tethys_iceberg::{
        ConfigError, Dashboard, FetchError, IcebergConfig, IcebergEngine, PortfolioSnapshot,
    };

    /// Run the iceberg dashboard headless and print the final frame
    #[derive(Debug, Parser)]
    #[command(name = "tethys-iceberg")]
    #[command(version, about = "Rank progression and achievement iceberg layout")]
    pub struct Options {
        /// JSON config file (defaults are used when omitted)
        #[arg(long, value_name = "PATH")]
        pub config: Option<PathBuf>,
        /// Number of animation ticks to run
        #[arg(long, value_name = "N", default_value_t = 60)]
        pub ticks: u64,
        /// Also tessellate the final scene and log the vertex count
        #[arg(long)]
        pub vertices: bool,
        /// Point total reported by the portfolio; omitted means the fetch fails
        #[arg(value_name = "POINTS")]
        pub points: Option<u64>,
    }

    fn load_config(opts: &Options) -> Result<IcebergConfig, ConfigError> {
        match &opts.config {
            Some(path) => IcebergConfig::load(path),
            None => Ok(IcebergConfig::default()),
        }
    }

    pub fn run(opts: Options) -> Result<(), String> {
        let config = load_config(&opts).map_err(|e| e.to_string())?;
        let engine = IcebergEngine::new(config).map_err(|e| e.to_string())?;
        let mut dashboard = Dashboard::new(engine);
        log::debug!(
            "Tick interval {} ms, {} ticks",
            dashboard.engine().config().tick_interval_ms,
            opts.ticks
        );

        // Stand-in for the portfolio service: a missing total is a failed fetch
        let ticket = dashboard.begin_fetch();
        let result = opts
            .points
            .map(|total| PortfolioSnapshot {
                total_points: Some(total),
            })
            .ok_or_else(|| FetchError::Transport("no point total given".to_string()));
        let (outcome, frame) = dashboard.complete_fetch(ticket, result);
        log::info!("Fetch outcome: {:?}", outcome);

        let mut last = frame.ok_or("dashboard is not running")?;
        for _ in 0..opts.ticks {
            match dashboard.tick() {
                Some(frame) => last = frame,
                None => break,
            }
        }

        let rank = &last.rank;
        match &rank.next {
            Some(next) => log::info!(
                "{} pts: {} ({:.0}% to {})",
                last.total,
                rank.current.name,
                rank.progress * 100.0,
                next.name
            ),
            None => log::info!("{} pts: {} (max rank)", last.total, rank.current.name),
        }
        log::info!(
            "Above water {:.1}%, peak at y={:.1}, t={:.3}",
            last.visual.visible_fraction,
            last.visual.waterline_offset,
            last.time
        );

        if opts.vertices {
            let cfg = dashboard.engine().config();
            let verts = SceneVertices::build(&last.scene, cfg.viewport_width, cfg.viewport_height);
            log::info!("Scene tessellates to {} vertices", verts.vertex_count());
        }

        let json = serde_json::to_string_pretty(&last).map_err(|e| e.to_string())?;
        println!("{json}");

        dashboard.teardown();
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = Options::try_parse_from(["tethys-iceberg"]).unwrap();
            assert_eq!(opts.ticks, 60);
            assert!(opts.config.is_none());
            assert!(opts.points.is_none());
            assert!(!opts.vertices);
        }

        #[test]
        fn test_all_flags() {
            let opts = Options::try_parse_from([
                "tethys-iceberg",
                "--config",
                "iceberg.json",
                "--ticks",
                "5",
                "--vertices",
                "1500",
            ])
            .unwrap();
            assert_eq!(opts.config, Some(PathBuf::from("iceberg.json")));
            assert_eq!(opts.ticks, 5);
            assert!(opts.vertices);
            assert_eq!(opts.points, Some(1500));
        }

        #[test]
        fn test_rejects_bad_numbers() {
            assert!(Options::try_parse_from(["tethys-iceberg", "--ticks", "many"]).is_err());
            assert!(Options::try_parse_from(["tethys-iceberg", "-12"]).is_err());
        }

        #[test]
        fn test_run_with_and_without_points() {
            let opts = Options::try_parse_from(["tethys-iceberg", "--ticks", "3", "--vertices", "900"]).unwrap();
            assert!(run(opts).is_ok());
            let opts = Options::try_parse_from(["tethys-iceberg", "--ticks", "0"]).unwrap();
            assert!(run(opts).is_ok());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Tethys Iceberg (native) starting...");
    if let Err(e) = native::run(native::Options::parse()) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build is driven by the host page through the library API.
}
