use plexus::{Plexus, RunError};

fn main() -> Result<(), RunError> {
    Plexus::new().with_title("plexus").run()
}
