pub const CLOCK_WIDTH: u16 = 21;
pub const CLOCK_HEIGHT: u16 = 11;

/// Draws a rounded box whose outline shrinks counterclockwise, starting at the
/// top center, as `remaining` falls from `1.0` to `0.0`.
pub fn clock(remaining: f64) -> String {
    let (width, height) = (CLOCK_WIDTH as usize, CLOCK_HEIGHT as usize);

    let mut grid = vec![vec![' '; width]; height];
    for col in 1..width - 1 {
        grid[0][col] = '─';
        grid[height - 1][col] = '─';
    }
    for row in grid.iter_mut().take(height - 1).skip(1) {
        row[0] = '│';
        row[width - 1] = '│';
    }
    grid[0][0] = '╭';
    grid[0][width - 1] = '╮';
    grid[height - 1][0] = '╰';
    grid[height - 1][width - 1] = '╯';

    let path = outline_path(width, height);
    let kept = (path.len() as f64 * remaining.clamp(0.0, 1.0)).ceil() as usize;
    for &(row, col) in path.iter().take(path.len() - kept) {
        grid[row][col] = ' ';
    }

    grid.iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every border cell exactly once, counterclockwise from the top center.
fn outline_path(width: usize, height: usize) -> Vec<(usize, usize)> {
    let center = width / 2;

    (0..=center)
        .rev()
        .map(|col| (0, col))
        .chain((1..height).map(|row| (row, 0)))
        .chain((1..width).map(|col| (height - 1, col)))
        .chain((0..height - 1).rev().map(|row| (row, width - 1)))
        .chain((center + 1..width - 1).rev().map(|col| (0, col)))
        .collect()
}
