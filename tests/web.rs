// Browser-side tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use canvas_snake::{Direction, GameConfig, GameLoop};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn entropy_fruit_avoids_snake() {
    let mut game = GameLoop::new(GameConfig::default()).unwrap();
    for _ in 0..50 {
        assert!(game.generate_fruit());
        assert!(!game.snake().occupies(game.fruit()));
        let f = game.fruit();
        assert!(f.x >= 0 && f.x < 500 && f.x % 25 == 0);
        assert!(f.y >= 0 && f.y < 500 && f.y % 25 == 0);
    }
}

#[wasm_bindgen_test]
fn walking_off_the_top_ends_the_game() {
    let mut game = GameLoop::new(GameConfig::default()).unwrap();
    game.set_direction(Direction::Up);
    assert!(game.tick().died);
    game.restart();
    assert!(game.is_alive());
}
