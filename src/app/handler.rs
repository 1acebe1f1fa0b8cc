use {
    crate::app::controller::run_job,
    crate::app::form::{Action, Field, TransferForm},
    crate::app::state::{Job, Outcome, ViewState},
    crate::constants::{
        APP_NAME, CONFIRMATIONS, MIN_TERMINAL_HEIGHT, RECEIPT_TIMEOUT_SECS, TICK_MS,
    },
    crate::libs::chain::{
        client::NodeProbe,
        ledger::{CoinLedger, MetaCoinLedger},
    },
    crate::libs::config::{load_env, Config},
    crate::libs::lookup::{save_log_to_file, short_addr},
    crate::libs::tui::{
        draw_box, draw_button, draw_input, draw_main_window, draw_status, draw_title_bar,
        draw_too_small, BoxProps, Theme,
    },
    crate::libs::writing::cc,
    crate::{log, warn},
    anyhow::Result,
    crossterm::{
        event::{Event, EventStream},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    futures_util::StreamExt,
    metacoin::{ReceiptWait, Tallies},
    ratatui::prelude::*,
    std::{sync::Arc, time::Duration},
    tokio::sync::mpsc,
};

const HELP: &str = "Tab focus · Enter send · F5 refresh · Esc quit";

pub async fn init() -> Result<()> {
    load_env();
    let cfg = Config::from_env()?;

    if cfg.rpc_url_is_fallback {
        warn!(
            "No RPC_URL set. Falling back to {}. Point RPC_URL at your own node or provider \
             for anything live; the local fallback is only meant for development.",
            cfg.rpc_url
        );
    }

    let probe = NodeProbe::new(&cfg.rpc_url)?;
    match (probe.client_version().await, probe.net_version().await) {
        (Ok(version), Ok(net)) => {
            log!(cc::LIGHT_GREEN, "Node {} (network {}) at {}", version, net, probe.url())
        }
        (Err(e), _) | (_, Err(e)) => warn!("Node probe at {} failed: {e:#}", probe.url()),
    }

    let wait = ReceiptWait {
        confirmations: *CONFIRMATIONS,
        timeout: Duration::from_secs(*RECEIPT_TIMEOUT_SECS),
    };
    let ledger = MetaCoinLedger::connect(&cfg, wait).await?;
    log!(
        cc::LIGHT_GREEN,
        "MetaCoin at {} on network {}",
        ledger.contract(),
        ledger.network_id()
    );
    if ledger.signs_locally() {
        log!(cc::LIGHT_CYAN, "Signing locally with PRIVATE_KEY");
    } else {
        log!(
            cc::LIGHT_YELLOW,
            "No PRIVATE_KEY; sending from the node's unlocked accounts"
        );
    }

    let header = format!(
        "network {} · MetaCoin {}",
        ledger.network_id(),
        short_addr(&ledger.contract())
    );
    let votes = read_votes(&ledger, &cfg).await;
    let mut app = CoinTUI::new(ledger, header, votes);
    app.run_tui().await
}

/// Voting side of the deployment. Failures are logged and never stop the
/// coin screen from starting.
async fn read_votes(ledger: &MetaCoinLedger, cfg: &Config) -> Option<Tallies> {
    let voting = cfg.voting_address?;
    if !cfg.voting_ballot.is_empty() {
        match ledger.total_votes(voting, cfg.voting_ballot.clone()).await {
            Ok(total) => log!(
                cc::LIGHT_CYAN,
                "Ballot {:?} totals {} votes",
                cfg.voting_ballot,
                total
            ),
            Err(e) => {
                warn!("totalVotes at {voting} failed: {e}");
                save_log_to_file(&format!("[voting] {e}"));
            }
        }
    }
    match ledger.tallies(voting).await {
        Ok(t) => {
            log!(cc::LIGHT_GREEN, "Voting at {} stands at {}", voting, t);
            Some(t)
        }
        Err(e) => {
            warn!("Reading tallies at {voting} failed: {e}");
            save_log_to_file(&format!("[voting] {e}"));
            None
        }
    }
}

pub struct CoinTUI<L> {
    ledger: Arc<L>,
    header: String,
    votes: Option<Tallies>,
    state: ViewState,
    form: TransferForm,
}

impl<L> CoinTUI<L>
where
    L: CoinLedger + 'static,
{
    pub fn new(ledger: L, header: String, votes: Option<Tallies>) -> Self {
        Self {
            ledger: Arc::new(ledger),
            header,
            votes,
            state: ViewState::new(),
            form: TransferForm::default(),
        }
    }

    async fn run_tui(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        let res = self.event_loop(&mut terminal).await;

        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        terminal.show_cursor()?;
        self.flush_log();
        res
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let (tx, mut rx) = mpsc::channel::<Outcome>(64);
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(*TICK_MS));

        let job = self.state.begin_start();
        self.spawn_job(job, &tx);

        loop {
            self.flush_log();
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                maybe_ev = events.next() => {
                    match maybe_ev {
                        Some(Ok(Event::Key(key))) => match self.form.handle_key(key) {
                            Action::Quit => break,
                            Action::Refresh => {
                                if let Some(job) = self.state.begin_refresh() {
                                    self.spawn_job(job, &tx);
                                }
                            }
                            Action::Submit => {
                                let job = self
                                    .state
                                    .begin_send(&self.form.amount, &self.form.receiver);
                                if let Some(job) = job {
                                    self.spawn_job(job, &tx);
                                }
                            }
                            Action::None => {}
                        },
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }
                Some(outcome) = rx.recv() => {
                    if let Some(next) = self.state.apply(outcome) {
                        self.spawn_job(next, &tx);
                    }
                }
                _ = ticker.tick() => {}
            }
        }
        Ok(())
    }

    fn spawn_job(&self, job: Job, tx: &mpsc::Sender<Outcome>) {
        save_log_to_file(&format!("[job] {job:?}"));
        let ledger = Arc::clone(&self.ledger);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = run_job(ledger.as_ref(), job).await;
            let _ = tx.send(outcome).await;
        });
    }

    fn flush_log(&mut self) {
        for line in self.state.take_unflushed() {
            save_log_to_file(&line);
        }
    }

    fn draw(&self, f: &mut Frame) {
        let size = f.area();
        draw_main_window(f, size);
        if size.height < *MIN_TERMINAL_HEIGHT {
            draw_too_small(f, size, *MIN_TERMINAL_HEIGHT);
            return;
        }
        let inner = size.inner(ratatui::layout::Margin::new(2, 1));
        let [title, top, amount, receiver, button, status, activity] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .areas(inner);

        draw_title_bar(f, title, APP_NAME, &self.header, HELP);

        let [account_area, balance_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(top);
        self.draw_account_block(f, account_area);
        self.draw_balance_block(f, balance_area);

        draw_input(
            f,
            amount,
            "Amount",
            &self.form.amount,
            "whole coins, e.g. 10",
            self.form.focus == Field::Amount,
        );
        draw_input(
            f,
            receiver,
            "Receiver",
            &self.form.receiver,
            "0x… receiving address",
            self.form.focus == Field::Receiver,
        );
        let [button, _] =
            Layout::horizontal([Constraint::Length(24), Constraint::Min(0)]).areas(button);
        draw_button(
            f,
            button,
            if self.state.transfer_in_flight {
                "Sending…"
            } else {
                "Send MetaCoin"
            },
            self.form.focus == Field::Send,
            self.state.transfer_in_flight,
        );
        draw_status(f, status, &self.state.status);
        self.draw_activity_block(f, activity);
    }

    fn draw_account_block(&self, f: &mut Frame, area: Rect) {
        let account = match self.state.account {
            Some(a) => a.to_checksum(None),
            None => "…".to_string(),
        };
        let last_tx = self
            .state
            .last_tx
            .map(|h| format!("{h}"))
            .unwrap_or_else(|| "none yet".into());
        let label = Style::default().fg(Color::Gray);
        let mut lines = vec![
            Line::from(vec![Span::styled("Account  ", label), Span::raw(account)]),
            Line::from(vec![Span::styled("Last tx  ", label), Span::raw(last_tx)]),
        ];
        if let Some(votes) = self.votes {
            lines.push(Line::from(vec![
                Span::styled("Votes    ", label),
                Span::raw(votes.to_string()),
            ]));
        }
        let props = BoxProps {
            border_color: Color::LightBlue,
            title: "Wallet".into(),
        };
        draw_box(f, area, lines, &props);
    }

    fn draw_balance_block(&self, f: &mut Frame, area: Rect) {
        let theme = Theme::coin_dark();
        let balance = self
            .state
            .balance
            .map(|b| b.to_string())
            .unwrap_or_else(|| "…".into());
        let in_eth = self
            .state
            .balance_in_eth
            .map(|b| format!("≈ {b} ETH"))
            .unwrap_or_default();
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    balance,
                    Style::default().fg(theme.coin).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" META", Style::default().fg(Color::Gray)),
            ]),
            Line::from(Span::styled(in_eth, Style::default().fg(Color::Gray))),
        ];
        let props = BoxProps {
            border_color: theme.coin,
            title: "Balance".into(),
        };
        draw_box(f, area, lines, &props);
    }

    fn draw_activity_block(&self, f: &mut Frame, area: Rect) {
        let rows = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .state
            .activity()
            .take(rows)
            .map(|l| Line::from(l.as_str()))
            .collect();
        let props = BoxProps {
            border_color: Color::DarkGray,
            title: "Activity".into(),
        };
        draw_box(f, area, lines, &props);
    }
}
