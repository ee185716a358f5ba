use serde::Serialize;
use std::collections::HashSet;

use crate::models::seat::seat_label;
use crate::selection::SelectionState;

/// Визуальное состояние одного кресла. Порядок приоритета фиксирован:
/// занятое место никогда не показывается как выбранное.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeatStatus {
    Taken,
    Selected,
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatCell {
    pub label: String,
    pub status: SeatStatus,
}

/// Чистое описание сетки зала, без привязки к поверхности отрисовки.
/// Отдельный шаг "применить к дисплею" живёт в ui.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GridDescription {
    pub rows: u32,
    pub cols: u32,
    /// Ряды в порядке следования, внутри ряда кресла слева направо.
    pub cells: Vec<Vec<SeatCell>>,
}

impl GridDescription {
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|r| r.is_empty())
    }
}

/// Строит описание сетки rows × cols. Ноль рядов или колонок — валидная
/// пустая сетка, не ошибка.
pub fn describe_grid(
    rows: u32,
    cols: u32,
    taken: &HashSet<String>,
    selected: &HashSet<String>,
) -> GridDescription {
    let mut cells = Vec::with_capacity(rows as usize);
    for r in 0..rows {
        let mut row = Vec::with_capacity(cols as usize);
        for c in 0..cols {
            let Some(label) = seat_label(r, c) else {
                continue;
            };
            let status = if taken.contains(&label) {
                SeatStatus::Taken
            } else if selected.contains(&label) {
                SeatStatus::Selected
            } else {
                SeatStatus::Available
            };
            row.push(SeatCell { label, status });
        }
        cells.push(row);
    }
    GridDescription { rows, cols, cells }
}

/// То же самое, но оба набора берутся из объекта состояния.
pub fn describe_from_state(rows: u32, cols: u32, state: &SelectionState) -> GridDescription {
    let mut cells = Vec::with_capacity(rows as usize);
    for r in 0..rows {
        let mut row = Vec::with_capacity(cols as usize);
        for c in 0..cols {
            let Some(label) = seat_label(r, c) else {
                continue;
            };
            let status = if state.is_taken(&label) {
                SeatStatus::Taken
            } else if state.is_selected(&label) {
                SeatStatus::Selected
            } else {
                SeatStatus::Available
            };
            row.push(SeatCell { label, status });
        }
        cells.push(row);
    }
    GridDescription { rows, cols, cells }
}
