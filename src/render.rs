use crate::game::ClickGame;

/// Backend-agnostic draw commands, in logical field coordinates. The game
/// never touches the terminal; the ui module consumes these each frame.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear,
    Circle { x: f32, y: f32, radius: f32 },
    ScoreText(String),
    TimeText(String),
    CenterMessage(String),
}

/// Pure snapshot of the game as a command list: clear, the single target,
/// the score/time readouts, and the end-of-game message once time is up.
pub fn draw(game: &ClickGame) -> Vec<DrawCmd> {
    let (x, y) = game.target();
    let mut cmds = vec![
        DrawCmd::Clear,
        DrawCmd::Circle {
            x,
            y,
            radius: game.config().radius,
        },
        DrawCmd::ScoreText(format!("Score: {}", game.score())),
        DrawCmd::TimeText(format!("Time: {}s", game.time_left())),
    ];
    if game.is_over() {
        cmds.push(DrawCmd::CenterMessage(format!(
            "Time's up!\nScore: {}",
            game.score()
        )));
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_game_draws_clear_target_and_readouts() {
        let game = ClickGame::new();
        let cmds = draw(&game);
        assert_eq!(cmds[0], DrawCmd::Clear);
        let (tx, ty) = game.target();
        assert_eq!(
            cmds[1],
            DrawCmd::Circle {
                x: tx,
                y: ty,
                radius: game.config().radius
            }
        );
        assert_eq!(cmds[2], DrawCmd::ScoreText("Score: 0".into()));
        assert_eq!(cmds[3], DrawCmd::TimeText("Time: 30s".into()));
        assert!(!cmds.iter().any(|c| matches!(c, DrawCmd::CenterMessage(_))));
    }

    #[test]
    fn timeout_adds_final_message_with_score() {
        let mut game = ClickGame::new();
        game.start();
        let (tx, ty) = game.target();
        game.on_field_click(tx, ty);
        game.advance(60_000);
        assert!(game.is_over());
        let cmds = draw(&game);
        let msg = cmds.iter().find_map(|c| match c {
            DrawCmd::CenterMessage(m) => Some(m.clone()),
            _ => None,
        });
        assert_eq!(msg.as_deref(), Some("Time's up!\nScore: 1"));
    }
}
