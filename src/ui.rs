//! Применение описания сетки к дисплею (терминалу). Вся логика состояния
//! живёт в grid/selection; здесь только раскраска и вывод.

use colored::Colorize;

use crate::grid::{GridDescription, SeatStatus};
use crate::models::seat::row_letter;

/// Строка-сводка под сеткой; пустой выбор показывается как "none".
pub fn summary_line(serialized: &str) -> String {
    if serialized.trim().is_empty() {
        "Selected seats: none".to_string()
    } else {
        format!("Selected seats: {}", serialized)
    }
}

pub fn print_grid(grid: &GridDescription) {
    if grid.is_empty() {
        println!("{}", "  (no seat grid for this selection)".dimmed());
        return;
    }

    // Шапка с номерами кресел.
    let mut header = String::from("    ");
    for c in 1..=grid.cols {
        header.push_str(&format!("{:>4}", c));
    }
    println!("{}", header.dimmed());

    for (r, row) in grid.cells.iter().enumerate() {
        let letter = row_letter(r as u32).unwrap_or('?');
        print!("  {} ", letter);
        for (c, cell) in row.iter().enumerate() {
            // В клетке показывается номер кресла, как на странице бронирования.
            let number = c + 1;
            match cell.status {
                SeatStatus::Taken => print!("{}", " XX ".red().dimmed()),
                SeatStatus::Selected => print!("{}", format!("[{:>2}]", number).green().bold()),
                SeatStatus::Available => print!(" {:>2} ", number),
            }
        }
        println!();
    }
}

pub fn print_summary(serialized: &str) {
    println!("{}", summary_line(serialized).cyan());
}
