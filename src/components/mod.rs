pub mod bouncing_ball;
pub mod points_chart;
