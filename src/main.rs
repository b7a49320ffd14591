//! Headless demo runner
//!
//! Loads level 0 into the built-in impulse world, scripts a single pull and
//! release, then ticks the round to its conclusion and prints the result.
//! Pass `--dump-frame` to emit the final frame snapshot as JSON.

use glam::Vec2;

use sling_siege::consts::SIM_DT;
use sling_siege::sim::ImpulseWorld;
use sling_siege::{OutcomeEvent, RoundController, Tuning};

const VIEW_W: f32 = 1280.0;
const VIEW_H: f32 = 720.0;

fn main() {
    env_logger::init();

    let mut game = RoundController::new(ImpulseWorld::new(), VIEW_W, VIEW_H, Tuning::classic());
    game.load_level(0);

    // Scripted shot: drag the bird down-left and let go.
    let bird = game.state().bird.expect("level load creates the bird");
    let pull_to = game.state().anchor + Vec2::new(-120.0, 60.0);
    game.world_mut().set_position(bird, pull_to);
    game.on_drag_end(bird);

    // Tick until the round concludes (the settle chain caps this well
    // under the 10 s guard).
    let mut concluded = Vec::new();
    for _ in 0..(10.0 / SIM_DT) as usize {
        game.tick(SIM_DT);
        concluded = game.drain_events();
        if !concluded.is_empty() {
            break;
        }
    }

    match concluded.first() {
        Some(OutcomeEvent::Won { score, cleared_all }) => {
            println!("won with {score} points{}", if *cleared_all { " (all levels clear)" } else { "" });
        }
        Some(OutcomeEvent::Lost { score }) => println!("lost with {score} points"),
        None => println!("round still in progress after 10 s (score {})", game.score()),
    }

    if std::env::args().any(|arg| arg == "--dump-frame") {
        let json = serde_json::to_string_pretty(&game.snapshot()).expect("snapshot serializes");
        println!("{json}");
    }
}
