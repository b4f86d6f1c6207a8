use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    fixture_sampler::example_apps::run_fixture_demo(std::env::args().skip(1))
}
