use crate::db::pool::DbPool;
use crate::db::queries::{LogRow, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 48;

fn strip_ansi(s: &str) -> String {
    Regex::new(r"\x1B\[[0-9;]*[mK]")
        .map(|re| re.replace_all(s, "").into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Colour per audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "init" => Colour::RGB(255, 153, 51),
        "job_store" => Colour::Green,
        "job_patch" => Colour::Yellow,
        "recalc" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

fn op_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = rows
            .iter()
            .map(|r| op_target(r).len())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = rows
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for row in &rows {
            let color = color_for_operation(&row.operation);

            let mut visible = op_target(row);
            if visible.chars().count() > MAX_OP_WIDTH {
                visible = visible.chars().take(MAX_OP_WIDTH - 3).collect::<String>() + "...";
            }

            // only the operation word is coloured
            let painted = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&painted).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                row.date,
                painted,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
