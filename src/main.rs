// ==========================================
// 学校组织数据管理 - 命令行主入口
// ==========================================
// 用法:
//   school-registry stats   <classes> <students>
//   school-registry promote <classes> <students>
//   school-registry charts  <classes> <students>
//   school-registry payroll [output.csv] [staff-file]
// ==========================================

use anyhow::{bail, Context};
use school_registry::api::{ApiError, SchoolSession};
use school_registry::app::AppState;
use school_registry::i18n::{t, t_with_args};
use school_registry::importer::salary_export::SalaryRow;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    school_registry::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    let mut state = AppState::from_env().context("配置加载失败")?;
    tracing::info!(version = school_registry::VERSION, command = %command, "启动");

    match command.as_str() {
        "stats" => {
            load_school(&mut state, &args)?;
            print_statistics(&state.session)?;
        }
        "promote" => {
            load_school(&mut state, &args)?;
            print_statistics(&state.session)?;
            state.session.promote_all()?;
            println!("{}", t("promote.finished"));
            print_statistics(&state.session)?;
        }
        "charts" => {
            load_school(&mut state, &args)?;
            let series = state.session.chart_series()?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        "payroll" => run_payroll(&mut state, &args)?,
        other => {
            print_usage();
            bail!("未知命令: {}", other);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("{} {}", school_registry::APP_NAME, school_registry::VERSION);
    println!("  stats   <classes> <students>");
    println!("  promote <classes> <students>");
    println!("  charts  <classes> <students>");
    println!("  payroll [output.csv] [staff-file]");
}

fn load_school(state: &mut AppState, args: &[String]) -> anyhow::Result<()> {
    let (Some(classes), Some(students)) = (args.get(1), args.get(2)) else {
        print_usage();
        bail!("缺少 classes / students 文件参数");
    };

    match state.session.load_files(classes, students) {
        Ok(summary) => {
            println!("{}", SchoolSession::load_message(&summary));
            if summary.skipped_students > 0 {
                println!(
                    "{}",
                    t_with_args(
                        "load.skipped",
                        &[("count", &summary.skipped_students.to_string())]
                    )
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
    }
}

fn print_statistics(session: &SchoolSession) -> Result<(), ApiError> {
    for line in session.statistics()?.render_lines() {
        println!("{}", line);
    }
    println!();
    Ok(())
}

fn run_payroll(state: &mut AppState, args: &[String]) -> anyhow::Result<()> {
    let output = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| state.salary_export_path());

    if let Some(staff_file) = args.get(2) {
        if let Err(e) = state.load_staff_file(staff_file) {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    }

    println!("{}", t("payroll.roster"));
    print_rows(&state.payroll.roster_rows())?;

    let summary = state.payroll.export_csv(&output)?;
    println!("{}", t("payroll.calculated"));
    print_rows(&summary.rows)?;
    println!(
        "{}",
        t_with_args("payroll.exported", &[("path", &output.display().to_string())])
    );
    Ok(())
}

fn print_rows(rows: &[SalaryRow]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}
