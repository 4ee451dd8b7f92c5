use tui_2048::core::{Board, Game};
use tui_2048::term::{AnchorY, Feedback, FrameBuffer, GameView, Viewport};
use tui_2048::types::{Direction, GameState, Pos};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = Game::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // 4 tiles of 6 columns plus 5 gaps plus 2 border columns = 31.
    let (w, h) = view.frame_size();
    let fb = view.render(&snap, Viewport::new(w, h));

    assert_eq!(fb.get(0, 0).unwrap().ch, '╭');
    assert_eq!(fb.get(w - 1, 0).unwrap().ch, '╮');
    assert_eq!(fb.get(0, h - 1).unwrap().ch, '╰');
    assert_eq!(fb.get(w - 1, h - 1).unwrap().ch, '╯');
}

#[test]
fn term_view_renders_tile_values_in_their_cells() {
    let board = Board::from_values([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2048]]);
    let snap = Game::from_board(1, board).snapshot();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let (w, h) = view.frame_size();
    let fb = view.render(&snap, Viewport::new(w, h));

    // Top-left tile: origin (2, 2), middle row 3, "2" centered in 6 columns.
    let (x, y) = view.tile_origin(0, 0, 0, 0);
    assert_eq!((x, y), (2, 2));
    assert_eq!(fb.get(x + 2, y + 1).unwrap().ch, '2');

    let (x, y) = view.tile_origin(0, 0, 3, 3);
    let row = fb.row_text(y + 1);
    let cell: String = row.chars().skip(x as usize).take(6).collect();
    assert_eq!(cell, " 2048 ");
}

#[test]
fn term_view_shows_start_screen_before_start() {
    let snap = Game::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    let text = screen_text(&fb);
    assert!(text.contains("PRESS ENTER TO START"));
}

#[test]
fn term_view_shows_end_screens() {
    let won = Board::from_values([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    let mut game = Game::from_board(1, won);
    game.apply_move(Direction::Left);
    assert_eq!(game.state(), GameState::Won);
    let text = screen_text(&GameView::default().render(&game.snapshot(), Viewport::new(80, 24)));
    assert!(text.contains("I've grown up perfectly!"));

    let lost = Board::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    let mut game = Game::from_board(1, lost);
    game.check_status();
    let text = screen_text(&GameView::default().render(&game.snapshot(), Viewport::new(80, 24)));
    assert!(text.contains("I've grown up one more time!"));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut game = Game::new(1);
    game.start();
    let mut snap = game.snapshot();
    snap.score = 1234;
    snap.moves = 56;

    let text = screen_text(&GameView::default().render(&snap, Viewport::new(80, 24)));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("MOVES"));
    assert!(!text.contains("PRESS ENTER"));

    // Too narrow for a panel.
    let view = GameView::default();
    let (w, h) = view.frame_size();
    let text = screen_text(&view.render(&snap, Viewport::new(w, h + 1)));
    assert!(!text.contains("SCORE"));
}

#[test]
fn term_view_floats_merge_message_at_the_merge_cell() {
    let board = Board::from_values([[4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    let mut game = Game::from_board(1, board);
    let result = game.apply_move(Direction::Left);

    let mut feedback = Feedback::new(1);
    feedback.on_move(&result);
    let msg = feedback.latest_message().unwrap();
    assert_eq!(msg.pos, Pos::new(0, 0));

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let (w, h) = view.frame_size();
    let fb = view.render_with_feedback(&game.snapshot(), Some(&feedback), Viewport::new(80, 24));

    // Gap row between the top border and the first tile row.
    let (x0, y0) = view.frame_origin(Viewport::new(80, 24));
    let (_, tile_y) = view.tile_origin(x0, y0, 0, 0);
    let row: String = fb
        .row_text(tile_y - 1)
        .chars()
        .skip(x0 as usize + 1)
        .take(w as usize - 2)
        .collect();
    let shown = row.trim();
    assert!(!shown.is_empty());
    assert!(msg.text.contains(shown));

    // The row under the board stays empty.
    assert!(fb.row_text(h).trim().is_empty());
}

#[test]
fn term_view_survives_tiny_viewports() {
    let mut game = Game::new(1);
    game.start();
    let snap = game.snapshot();
    let view = GameView::default();
    for (w, h) in [(0, 0), (1, 1), (10, 5), (31, 4)] {
        let fb = view.render(&snap, Viewport::new(w, h));
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}
