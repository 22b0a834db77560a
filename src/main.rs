//! ATS scorer: resume and job description compatibility scoring tool

use clap::Parser;
use log::{error, info};
use std::process;

use ats_scorer::cli::{self, Cli, Commands, ConfigAction};
use ats_scorer::config::Config;
use ats_scorer::error::{AtsScorerError, Result};
use ats_scorer::input::InputManager;
use ats_scorer::output::ReportGenerator;
use ats_scorer::scoring::{JobPosting, ScoringEngine};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            title,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["json"])
                .map_err(|e| AtsScorerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| AtsScorerError::InvalidInput(format!("Job description file: {}", e)))?;
            let output_format =
                cli::parse_output_format(&output).map_err(AtsScorerError::InvalidInput)?;

            info!("Scoring {} against {}", resume.display(), job.display());

            let mut input_manager = InputManager::new();
            let resume_content = input_manager.load_resume(&resume)?;
            let posting = JobPosting {
                title,
                description: input_manager.load_job_description(&job)?,
            };

            let engine = ScoringEngine::from_config(&config);
            let report = engine.score_posting(&resume_content, &posting)?;

            let rendered = ReportGenerator::format(
                &report,
                output_format,
                detailed || config.output.detailed,
                config.output.color_output,
            )?;

            match save {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!("Report written to {}", path.display());
                }
                None => println!("{rendered}"),
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| AtsScorerError::Configuration(e.to_string()))?;
                println!("{content}");
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults.");
                Ok(())
            }
        },
    }
}
