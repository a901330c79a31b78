use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The sides do not satisfy the triangle inequality.
a: {a}, b: {b}, c: {c}")]
    InvalidTriangle { a: f64, b: f64, c: f64 },

    #[error("The base triangle is degenerate: its vertices are collinear.")]
    DegenerateTriangle,

    #[error("A regular base needs at least 3 sides, got {0}.")]
    TooFewSides(u32),

    #[error("The parameter `{name}` must be positive, got {value}.")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[test]
#[rustfmt::skip]
fn print_messages() {
    use std::io::Write;
    let stderr = &mut std::io::stderr();
    writeln!(stderr, "****** test of the expressions of error messages ******\n").unwrap();
    writeln!(stderr, "{}\n", Error::InvalidTriangle { a: 1.0, b: 1.0, c: 3.0 }).unwrap();
    writeln!(stderr, "{}\n", Error::DegenerateTriangle).unwrap();
    writeln!(stderr, "{}\n", Error::TooFewSides(2)).unwrap();
    writeln!(stderr, "{}\n", Error::NonPositive { name: "height", value: -1.0 }).unwrap();
    let json = serde_json::from_str::<f64>("{").unwrap_err();
    writeln!(stderr, "{}\n", Error::from(json)).unwrap();
    writeln!(stderr, "*******************************************************").unwrap();
}
