pub mod p900_pipeline_board;
