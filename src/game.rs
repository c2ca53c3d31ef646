use std::thread::sleep;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::input::{translate, Input};
use crate::render::Renderer;
use crate::states::StateManager;
use crate::term::{TermEvent, TermManager};

const FRAME_INTERVAL_MS: u64 = 10;

pub struct SnakeGame {
    term: TermManager,
    states: StateManager,
}

impl SnakeGame {
    pub fn new(config: &Config) -> Result<Self> {
        let term = TermManager::new()?;
        let states = StateManager::new(config, StdRng::from_entropy());
        Ok(SnakeGame { term, states })
    }

    /// Takes over the terminal, plays until quit, and always hands the
    /// terminal back, even when the loop fails.
    pub fn run(&mut self) -> Result<()> {
        let played = self.term.setup().and_then(|_| self.main_loop());
        let restored = self.term.restore();
        played.and(restored)
    }

    fn main_loop(&mut self) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            sleep(Duration::from_millis(FRAME_INTERVAL_MS));

            for ev in self.term.read_events_queue()? {
                match ev {
                    TermEvent::Key(key_ev) => match translate(&key_ev) {
                        Some(Input::Quit) => {
                            info!("Ctrl+C pressed");
                            return Ok(());
                        }
                        Some(Input::Key(key)) => self.states.handle_key(key),
                        None => {}
                    },
                    TermEvent::Resize => debug!(viewport = self.term.viewport_size(), "Viewport changed"),
                }
            }

            // Only whole milliseconds are handed out; the rest carries over.
            let elapsed = last_frame.elapsed().as_millis().min(u32::MAX as u128) as u32;
            last_frame += Duration::from_millis(elapsed as u64);

            if !self.states.update(elapsed) {
                return Ok(());
            }

            self.states.render(&mut self.term);
            self.term.present()?;
        }
    }
}
