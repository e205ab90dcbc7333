//! Status conversions for HiGHS integration.

use highs::HighsModelStatus;
use quadmip_solver::SolverStatus;

pub(crate) fn highs_to_status(status: HighsModelStatus) -> SolverStatus {
    match status {
        HighsModelStatus::Optimal => SolverStatus::Optimal,
        HighsModelStatus::Infeasible => SolverStatus::Infeasible,
        HighsModelStatus::Unbounded => SolverStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => SolverStatus::InfeasibleOrUnbounded,
        HighsModelStatus::ReachedTimeLimit => SolverStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => SolverStatus::ReachedIterationLimit,
        _ => SolverStatus::Unknown,
    }
}

/// Whether HiGHS holds primal values worth reading back.
pub(crate) fn has_solution(status: SolverStatus) -> bool {
    status.is_feasible()
}
