//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Spatial discretization](#spatial-discretization)
//! - [Time stepping](#time-stepping)
//! - [Boundary conditions](#boundary-conditions)
//!
//! # Background
//! The system integrates the one-dimensional time-dependent Schrödinger
//! equation (TDSE)
//! ```text
//!    ∂ψ     ħ²  ∂²ψ
//! iħ -- = - --- --- + V(x) ψ
//!    ∂t     2m  ∂x²
//! ```
//! for a localized wave packet launched toward a rectangular potential
//! barrier,
//! ```text
//! V(x) = V₀ for x ∊ [x_b, x_b + w),    V(x) = 0 elsewhere.
//! ```
//! The initial state is a Gaussian envelope modulated by a carrier
//! wavevector,
//! ```text
//! ψ(x, 0) ∝ exp(-(x - x₀)²/4σ² + i k₀ x),
//! ```
//! whose classical analogue would be transmitted or reflected outright; the
//! quantum packet splits, with a portion tunnelling through the barrier even
//! when the carrier energy lies below V₀. This scenario is the classic
//! subject of the computer-generated wavefunction films of Goldberg, Schey,
//! and Schwartz[^1].
//!
//! # Units
//! All library quantities are naturalized so that ħ = 1 and energies are
//! measured in units of ħ²/2*m*a² for a particle mass *m* and base length
//! scale *a*; positions are measured in units of *a* and times in units of
//! ħ divided by the energy unit. In these units the TDSE reads
//! ```text
//!   ∂ψ      ∂²ψ
//! i -- =  - --- + V(x) ψ  =  H ψ
//!   ∂t      ∂x²
//! ```
//! and a free packet with carrier wavevector k₀ has energy k₀² and group
//! velocity 2 k₀. [`units::Units`][crate::units::Units] carries the scaling
//! factors for converting laboratory (MKS) inputs into this system.
//!
//! # Spatial discretization
//! The domain [x_min, x_max] is sampled uniformly,
//! ```text
//! x[i] = x_min + i δx,  i ∊ {0, ..., N - 1},  δx = (x_max - x_min)/(N - 1),
//! ```
//! and the second derivative is replaced by the centered three-point stencil
//! ```text
//! ∂²ψ      ψ[i - 1] - 2 ψ[i] + ψ[i + 1]
//! ---[i] ≈ ---------------------------- + O(δx²)
//! ∂x²                  δx²
//! ```
//! which renders H a real symmetric tridiagonal matrix: diagonal entries
//! 2/δx² + V[i] and constant off-diagonal entries -1/δx². Symmetry
//! (Hermiticity) is what guarantees real energy expectation values and, via
//! the Cayley form below, exact norm conservation.
//!
//! # Time stepping
//! Naively discretizing the time derivative gives the explicit update
//! ψⁿ⁺¹ = (I - i δt H) ψⁿ, which amplifies every eigencomponent of ψ by
//! |1 - i δt λ| > 1 and is therefore unconditionally unstable for this
//! operator. Instead the propagator exp(-i δt H) is approximated by its
//! Cayley form[^2]
//! ```text
//!              1 - i δt H / 2
//! exp(-iδtH) ≈ --------------,
//!              1 + i δt H / 2
//! ```
//! i.e. each step solves the linear system
//! ```text
//! (I + i δt/2 H) ψⁿ⁺¹ = (I - i δt/2 H) ψⁿ
//! ```
//! (the Crank–Nicolson scheme[^3]). Because H is Hermitian, the Cayley
//! operator is exactly unitary: every eigencomponent is multiplied by a
//! complex number of unit modulus, so the discrete norm is conserved to
//! machine precision for ANY step size, and the scheme is second-order
//! accurate in δt. Large steps degrade accuracy (phase errors), never
//! stability.
//!
//! Both Cayley operators inherit H's tridiagonal structure, and the
//! left-hand matrix is the same for every step. Its LU (Thomas) elimination
//! coefficients are therefore computed once up front, after which each step
//! costs three O(N) sweeps — right-hand-side product, forward elimination,
//! back substitution — rather than the O(N³) of a dense solve. The
//! left-hand diagonal 1 + i δt/2 (2/δx² + V[i]) strictly dominates the
//! off-diagonals for V ≥ 0, so the elimination is stable without pivoting.
//!
//! # Boundary conditions
//! The wavefunction is pinned to zero outside the domain: the stencil's
//! missing neighbors at i = 0 and i = N - 1 are taken as 0 (Dirichlet).
//! This makes the domain edges perfectly reflecting hard walls; simulations
//! must size the domain with enough margin that the packet (including its
//! transmitted and reflected parts) does not reach an edge during the
//! simulated interval, or edge reflections will contaminate long runs.
//!
//! [^1]: A. Goldberg, H. M. Schey, J. L. Schwartz, "Computer-generated
//!     motion pictures of one-dimensional quantum-mechanical transmission
//!     and reflection phenomena," Am. J. Phys. **35**, 177 (1967).
//!
//! [^2]: W. H. Press, S. A. Teukolsky, W. T. Vetterling, B. P. Flannery,
//!     *Numerical Recipes* (3rd ed.), §20.2.
//!
//! [^3]: J. Crank, P. Nicolson, "A practical method for numerical evaluation
//!     of solutions of partial differential equations of the heat-conduction
//!     type," Math. Proc. Camb. Phil. Soc. **43**, 50 (1947).
