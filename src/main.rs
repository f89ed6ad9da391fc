use chessrules::chess::game::Game;

/// Replays the moves given on the command line. Each argument holds four
/// digits: from row, from column, to row, to column (e.g. `6444` or `6,4-4,4`).
fn main() {
    env_logger::init();

    let mut game = Game::new();
    for arg in std::env::args().skip(1) {
        let coords: Vec<u8> = arg
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .collect();
        if coords.len() != 4 {
            eprintln!("{}: expected four coordinates", arg);
            continue;
        }

        let player = game.current_player();
        match game.play(coords[0], coords[1], coords[2], coords[3]) {
            Ok(mov) => println!("{}. {} {}", game.moves_played(), player, mov),
            Err(e) => println!("{}", e),
        }

        if let Some(outcome) = game.outcome() {
            println!("game over: {:?}", outcome);
            return;
        }
    }

    if game.is_king_in_check(game.current_player()) {
        println!("{} is in check", game.current_player());
    }
    println!("{} to move", game.current_player());
}
