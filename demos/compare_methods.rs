use beamx::{BeamParameters, BeamSolver, InitialCondition, SolverSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A 6 m beam with a 100 mm x 200 mm steel section and a 2 kN load
    let beam = BeamParameters {
        length: 6.0,
        flexural_rigidity: BeamParameters::rectangular_section(200.0e9, 0.1, 0.2),
        load_magnitude: 2_000.0,
        load_position: 2.0,
    };

    // Use the same spread for both methods and shoot for true simple supports
    let settings = SolverSettings {
        rk4_spread: 0.1,
        rk4_step: 0.05,
        initial_condition: InitialCondition::SimplySupported,
        central_spread: 0.1,
        grid_points: 121,
        ..SolverSettings::default()
    };

    let comparison = BeamSolver::new(beam, settings)?.compare();

    // Print the peak of each curve
    for series in comparison.series() {
        if let Some(peak) = series.curve.peak() {
            println!(
                "{}: {:+.4e} m at x = {:.2} m",
                series.label, peak.deflection, peak.position
            );
        }
    }

    Ok(())
}
