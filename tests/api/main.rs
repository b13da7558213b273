mod helpers;
mod test_send_batch;
mod test_template;
