/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made on the propagation paths.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [assignment orchestrators](crate::procedures::assign)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to pivot election and the echelon invariant
    pub const BASIS: &str = "basis";

    /// Logs related to the [trail](crate::db::trail)
    pub const TRAIL: &str = "trail";

    /// Logs related to the [matrix](crate::db::matrix)
    pub const MATRIX: &str = "matrix";
}
