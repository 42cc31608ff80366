use anyhow::Result;
use ledger_app::{Command, HELP, Navigation, Session};
use ledger_store::{LoadOutcome, TriggerOutcome};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout},
    task::{JoinError, JoinSet},
};
use tracing::{debug, warn};

/// Requests running in the background while the operator keeps typing.
enum Background {
    Load(LoadOutcome),
    Recompute(TriggerOutcome),
}

enum Event {
    Input(Option<String>),
    Finished(Result<Background, JoinError>),
}

/// Line-oriented operator console: one command per line, the screen is
/// redrawn after every command and whenever a background request ends.
pub struct Console {
    session: Session,
    background: JoinSet<Background>,
    notice: Option<String>,
}

impl Console {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            background: JoinSet::new(),
            notice: None,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        self.spawn_load();
        self.draw(&mut stdout).await?;

        loop {
            let event = tokio::select! {
                line = lines.next_line() => Event::Input(line?),
                Some(done) = self.background.join_next() => Event::Finished(done),
            };

            match event {
                Event::Input(None) => break,
                Event::Input(Some(line)) => match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => self.apply(command).await,
                    Err(err) => self.notice = Some(err.to_string()),
                },
                Event::Finished(Ok(Background::Load(outcome))) => {
                    debug!(?outcome, "Background load finished");
                }
                Event::Finished(Ok(Background::Recompute(outcome))) => {
                    debug!(?outcome, "Background recompute finished");
                }
                Event::Finished(Err(err)) => warn!(error = %err, "Background request panicked"),
            }
            self.draw(&mut stdout).await?;
        }

        self.background.shutdown().await;
        Ok(())
    }

    async fn apply(&mut self, command: Command) {
        match command {
            Command::Redraw => {}
            Command::Reload => self.spawn_load(),
            Command::Search(query) => {
                self.session.search(&query);
            }
            Command::ClearSearch => {
                self.session.search("");
            }
            Command::Recompute(month) => {
                let task = self.session.recompute_task(month);
                self.background
                    .spawn(async move { Background::Recompute(task.await) });
            }
            Command::First => self.navigate(Navigation::First),
            Command::Previous => self.navigate(Navigation::Previous),
            Command::Next => self.navigate(Navigation::Next),
            Command::Last => self.navigate(Navigation::Last),
            Command::Page(input) => {
                if let Err(err) = self.session.jump_to(&input) {
                    self.notice = Some(err.to_string());
                }
            }
            Command::Rows(page_size) => self.session.set_page_size(page_size),
            Command::Export => {
                let today = chrono::Local::now().date_naive();
                // The outcome is posted to the status line either way.
                let _ = self.session.export(today).await;
            }
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Quit => {}
        }
    }

    fn navigate(&mut self, navigation: Navigation) {
        self.session.navigate(navigation);
    }

    fn spawn_load(&mut self) {
        let task = self.session.load_task();
        self.background
            .spawn(async move { Background::Load(task.await) });
    }

    async fn draw(&mut self, stdout: &mut Stdout) -> Result<()> {
        let mut frame = self.session.screen().to_string();
        if let Some(notice) = self.notice.take() {
            frame.push_str(&notice);
            frame.push('\n');
        }
        frame.push_str("> ");

        stdout.write_all(frame.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
