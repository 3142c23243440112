use clap::Parser;
use lectern::application::{
    init, list_lessons, reading_order, BuildOptions, BuildSiteService, CheckOptions, CheckService,
    ConfigService, NewLessonService, OpenLessonService,
};
use lectern::cli::{
    format_build_summary, format_check_report, format_lesson_list, format_reading_order, Cli,
    Commands,
};
use lectern::error::LecternError;
use lectern::infrastructure::{CurriculumRepository, FileSystemRepository};

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), LecternError> {
    match cli.command {
        Commands::Init { path, title } => init::init(&path, title.as_deref()),

        Commands::New { name, title, open } => {
            let repo = FileSystemRepository::discover()?;
            let service = NewLessonService::new(repo);
            let path = service.execute(&name, title.as_deref(), open)?;
            println!("Created {}", path);
            Ok(())
        }

        Commands::Open { lesson, path_only } => {
            let repo = FileSystemRepository::discover()?;
            let service = OpenLessonService::new(repo.clone());
            let resolved = service.execute(&lesson, !path_only)?;
            if path_only {
                println!("{}", repo.root().join(resolved).display());
            }
            Ok(())
        }

        Commands::List { long } => {
            let repo = FileSystemRepository::discover()?;
            let rows = list_lessons(&repo)?;
            print!("{}", format_lesson_list(&rows, long));
            Ok(())
        }

        Commands::Check {
            links,
            snippets,
            orphans,
            strict,
        } => {
            let repo = FileSystemRepository::discover()?;
            let service = CheckService::new(repo);
            let options = CheckOptions {
                links,
                snippets,
                orphans,
                strict,
                site_dir: None,
            };
            let report = service.execute(&options)?;
            print!("{}", format_check_report(&report));

            if report.has_failures(strict) {
                let mut failing = report.error_count();
                if strict {
                    failing += report.warning_count();
                }
                return Err(LecternError::ChecksFailed(failing));
            }
            Ok(())
        }

        Commands::Order => {
            let repo = FileSystemRepository::discover()?;
            let report = reading_order(&repo)?;
            print!("{}", format_reading_order(&report));
            Ok(())
        }

        Commands::Build { out, clean } => {
            let repo = FileSystemRepository::discover()?;

            // Never publish a curriculum that fails its checks; an earlier
            // output directory is not part of the corpus
            let check = CheckService::new(repo.clone());
            let report = check.execute(&CheckOptions {
                site_dir: out.clone(),
                ..Default::default()
            })?;
            if report.error_count() > 0 {
                print!("{}", format_check_report(&report));
                return Err(LecternError::ChecksFailed(report.error_count()));
            }

            let service = BuildSiteService::new(repo);
            let summary = service.execute(&BuildOptions { out, clean })?;
            println!("{}", format_build_summary(&summary));
            Ok(())
        }

        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("title = {}", config.title);
                println!("index = {}", config.index);
                println!("lessons_dir = {}", config.lessons_dir);
                println!("site_dir = {}", config.site_dir);
                println!("editor = {}", config.editor);
                println!("languages = {}", config.languages.join(", "));
                println!("leaf_resources = {}", config.leaf_resources.join(", "));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: lectern config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: title, index, lessons_dir, site_dir, editor, languages, \
                     leaf_resources"
                );
                Ok(())
            }
        }
    }
}
