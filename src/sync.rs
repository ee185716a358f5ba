//! sync.rs
//!
//! Синхронизация занятости мест с текущим выбором полей формы.
//!
//! Протокол на любое изменение поля (и на первую загрузку):
//! 1. прогнать редьюсер зависимых полей (может сбросить зал/время);
//! 2. безоговорочно сбросить выбор пользователя — смена идентичности сеанса
//!    инвалидирует его, даже если ключ ещё не полон;
//! 3. взять размеры зала из выбранного экрана, иначе (0, 0);
//! 4. неполный ключ или вырожденная сетка — пустая сетка без сетевого вызова;
//! 5. иначе один асинхронный запрос занятости; неуспех — fail-open
//!    (`taken = ∅`, локальные размеры), успех — takenSeats плюс серверные
//!    rowsCount/colsCount поверх локальных;
//! 6. собрать описание сетки с пустым выбором.
//!
//! Защита от устаревших ответов: каждый план получает билет из монотонного
//! счётчика в момент выдачи; завершение с неактуальным билетом отбрасывается,
//! так что сетку всегда определяет последний *инициированный* ключ, а не
//! последний завершившийся ответ.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

use crate::filter::{self, FieldSelection, FilterOutcome};
use crate::grid::{describe_from_state, GridDescription};
use crate::models::{Catalog, ShowingKey};
use crate::occupancy_client::OccupancyClient;
use crate::selection::SelectionState;

/// План обновления, выданный синхронной половиной протокола.
#[derive(Debug)]
pub enum Plan {
    /// Ключ неполон или сетка вырождена: рисуем локально, без запроса.
    Local { rows: u32, cols: u32 },
    /// Полный ключ: нужен запрос занятости с этим билетом.
    Fetch {
        key: ShowingKey,
        rows: u32,
        cols: u32,
        ticket: u64,
    },
}

/// Итог выполнения плана.
#[derive(Debug)]
pub enum Refresh {
    /// Ответ пришёл с неактуальным билетом и отброшен.
    Stale,
    /// Актуальный набор занятых мест и размеры сетки.
    Resolved {
        rows: u32,
        cols: u32,
        taken: HashSet<String>,
    },
}

pub struct AvailabilitySync {
    client: OccupancyClient,
    seq: AtomicU64,
}

impl AvailabilitySync {
    pub fn new(client: OccupancyClient) -> Self {
        Self { client, seq: AtomicU64::new(0) }
    }

    /// Синхронная половина протокола (шаги 1–4): корректирует выбор полей,
    /// сбрасывает выбор мест и решает, нужен ли сетевой вызов.
    ///
    /// Выдача нового билета происходит здесь — в том числе для локальных
    /// планов, чтобы ещё летящий старый запрос гарантированно устарел.
    pub fn plan(
        &self,
        catalog: &Catalog,
        current: &FieldSelection,
        state: &mut SelectionState,
    ) -> (FilterOutcome, Plan) {
        let outcome = filter::apply(catalog, current);

        // Любая смена идентичности сеанса инвалидирует прежний выбор.
        state.clear();

        let (rows, cols) = match outcome.selection.screen_id.and_then(|id| catalog.screen(id)) {
            Some(screen) => (screen.rows_count, screen.cols_count),
            None => (0, 0),
        };

        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let sel = &outcome.selection;
        let plan = match (sel.cinema_id, sel.screen_id, sel.date, sel.time.clone()) {
            (Some(cinema_id), Some(screen_id), Some(date), Some(time))
                if rows > 0 && cols > 0 =>
            {
                Plan::Fetch {
                    key: ShowingKey { cinema_id, screen_id, date, time },
                    rows,
                    cols,
                    ticket,
                }
            }
            _ => Plan::Local { rows, cols },
        };

        (outcome, plan)
    }

    /// Асинхронная половина (шаги 5): выполняет план. Единственная точка
    /// приостановки — сам запрос занятости.
    pub async fn execute(&self, plan: Plan) -> Refresh {
        match plan {
            Plan::Local { rows, cols } => Refresh::Resolved {
                rows,
                cols,
                taken: HashSet::new(),
            },
            Plan::Fetch { key, rows, cols, ticket } => {
                let result = self.client.fetch_taken(&key).await;

                // Пока мы ждали, мог быть выдан более свежий билет.
                if self.seq.load(Ordering::SeqCst) != ticket {
                    info!("discarding stale occupancy response (ticket {})", ticket);
                    return Refresh::Stale;
                }

                match result {
                    Ok(resp) => Refresh::Resolved {
                        rows: resp.rows_count.unwrap_or(rows),
                        cols: resp.cols_count.unwrap_or(cols),
                        taken: resp.taken_seats.unwrap_or_default().into_iter().collect(),
                    },
                    Err(e) => {
                        // Fail-open: сервис занятости недоступен — считаем,
                        // что занятых мест не известно, и остаёмся рабочими.
                        warn!("occupancy lookup failed, falling back to empty set: {}", e);
                        Refresh::Resolved {
                            rows,
                            cols,
                            taken: HashSet::new(),
                        }
                    }
                }
            }
        }
    }

    /// Полный цикл протокола: план, запрос, применение к состоянию и
    /// описание сетки. `None` вместо сетки означает отброшенный устаревший
    /// ответ — вызывающая сторона просто ничего не перерисовывает.
    pub async fn refresh(
        &self,
        catalog: &Catalog,
        current: &FieldSelection,
        state: &mut SelectionState,
    ) -> (FilterOutcome, Option<GridDescription>) {
        let (outcome, plan) = self.plan(catalog, current, state);
        match self.execute(plan).await {
            Refresh::Stale => (outcome, None),
            Refresh::Resolved { rows, cols, taken } => {
                state.set_taken(taken);
                (outcome, Some(describe_from_state(rows, cols, state)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OccupancyConfig;
    use crate::grid::SeatStatus;
    use chrono::NaiveDate;
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sync_against(server: &MockServer) -> AvailabilitySync {
        AvailabilitySync::new(OccupancyClient::from_config(&OccupancyConfig {
            seat_api_url: format!("{}/book/seats", server.uri()),
            timeout_seconds: 5,
        }))
    }

    fn complete_selection() -> FieldSelection {
        FieldSelection {
            cinema_id: Some(1),
            screen_id: Some(1),
            date: NaiveDate::from_ymd_opt(2026, 9, 1),
            time: Some("14:00".to_string()),
        }
    }

    #[tokio::test]
    async fn incomplete_key_renders_locally_without_a_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let sync = sync_against(&server);
        let catalog = Catalog::demo();
        let mut state = SelectionState::new();
        state.toggle("A1");

        let mut sel = complete_selection();
        sel.time = None;
        let (_, grid) = sync.refresh(&catalog, &sel, &mut state).await;

        let grid = grid.unwrap();
        // Размеры берутся из выбранного зала, занятых нет, выбор сброшен.
        assert_eq!((grid.rows, grid.cols), (8, 10));
        assert_eq!(state.serialize(), "");
        assert!(grid
            .cells
            .iter()
            .flatten()
            .all(|c| c.status == SeatStatus::Available));
    }

    #[tokio::test]
    async fn no_screen_means_empty_grid() {
        let server = MockServer::start().await;
        let sync = sync_against(&server);
        let catalog = Catalog::demo();
        let mut state = SelectionState::new();

        let sel = FieldSelection::default();
        let (outcome, grid) = sync.refresh(&catalog, &sel, &mut state).await;
        assert!(grid.unwrap().is_empty());
        assert!(outcome.selectable_screens.is_empty());
    }

    #[tokio::test]
    async fn successful_lookup_marks_taken_seats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "takenSeats": ["A1", "A2"],
                "rowsCount": 2,
                "colsCount": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sync = sync_against(&server);
        let catalog = Catalog::demo();
        let mut state = SelectionState::new();

        let (_, grid) = sync
            .refresh(&catalog, &complete_selection(), &mut state)
            .await;
        let grid = grid.unwrap();

        // Серверные размеры перекрывают локальные 8×10.
        assert_eq!((grid.rows, grid.cols), (2, 3));
        assert_eq!(grid.cells[0][0].status, SeatStatus::Taken);
        assert_eq!(grid.cells[0][1].status, SeatStatus::Taken);
        assert_eq!(grid.cells[0][2].status, SeatStatus::Available);
        assert!(state.is_taken("A2"));
        // Занятое место нельзя выбрать и после синхронизации.
        state.toggle("A1");
        assert_eq!(state.serialize(), "");
    }

    #[tokio::test]
    async fn failing_lookup_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sync = sync_against(&server);
        let catalog = Catalog::demo();
        let mut state = SelectionState::new();

        let (_, grid) = sync
            .refresh(&catalog, &complete_selection(), &mut state)
            .await;
        let grid = grid.unwrap();

        // Локальные размеры, ни одного занятого места.
        assert_eq!((grid.rows, grid.cols), (8, 10));
        assert!(grid
            .cells
            .iter()
            .flatten()
            .all(|c| c.status == SeatStatus::Available));
    }

    #[tokio::test]
    async fn cinema_change_clears_previous_selection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "takenSeats": []
            })))
            .mount(&server)
            .await;

        let sync = sync_against(&server);
        let catalog = Catalog::demo();
        let mut state = SelectionState::new();

        let (_, _) = sync
            .refresh(&catalog, &complete_selection(), &mut state)
            .await;
        state.toggle("B3");
        assert_eq!(state.serialize(), "B3");

        let mut changed = complete_selection();
        changed.cinema_id = Some(2);
        let (outcome, _) = sync.refresh(&catalog, &changed, &mut state).await;

        assert_eq!(state.serialize(), "");
        // Каскадный сброс: у кинотеатра 2 нет залов.
        assert_eq!(outcome.selection.screen_id, None);
        assert_eq!(outcome.selection.time, None);
    }

    #[tokio::test]
    async fn slow_stale_response_is_discarded() {
        let server = MockServer::start().await;
        // Медленный ответ для первого ключа, быстрый для второго.
        Mock::given(method("GET"))
            .and(query_param("time", "14:00"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(300))
                    .set_body_json(serde_json::json!({ "takenSeats": ["A1"] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("time", "18:30"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "takenSeats": ["B1"] })),
            )
            .mount(&server)
            .await;

        let sync = sync_against(&server);
        let catalog = Catalog::demo();
        let mut state = SelectionState::new();

        let (_, slow_plan) = sync.plan(&catalog, &complete_selection(), &mut state);

        let mut second = complete_selection();
        second.time = Some("18:30".to_string());
        let (_, fast_plan) = sync.plan(&catalog, &second, &mut state);

        let (slow, fast) = tokio::join!(sync.execute(slow_plan), sync.execute(fast_plan));

        // Побеждает последний инициированный ключ, медленный ответ в мусор.
        assert!(matches!(slow, Refresh::Stale));
        match fast {
            Refresh::Resolved { taken, .. } => assert!(taken.contains("B1")),
            Refresh::Stale => panic!("latest plan must not be stale"),
        }
    }
}
