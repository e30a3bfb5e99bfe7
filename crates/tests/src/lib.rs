#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_api_tests;

#[cfg(test)]
mod course_api_tests;

#[cfg(test)]
mod error_mapping_tests;

#[cfg(test)]
mod lecture_api_tests;

#[cfg(test)]
mod session_flow_tests;
